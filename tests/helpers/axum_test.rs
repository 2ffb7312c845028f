// ABOUTME: In-process HTTP driver for integration tests
// ABOUTME: Sends requests through the router with tower::oneshot, no socket involved

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde::Serialize;
use tower::ServiceExt;

/// Builder for one request against the application router.
///
/// Each test builds a fresh router, so consecutive requests in a test hit
/// the same database but independent router instances.
pub struct AxumTestRequest {
    request: axum::http::request::Builder,
    body: Body,
}

impl AxumTestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            request: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    /// GET request
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// POST request
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    /// PATCH request
    #[allow(dead_code)]
    pub fn patch(uri: &str) -> Self {
        Self::new(Method::PATCH, uri)
    }

    /// DELETE request
    #[allow(dead_code)]
    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    /// Set a request header
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    /// Attach a JSON body and the matching content type
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.request = self
            .request
            .header(header::CONTENT_TYPE, "application/json");
        self.body = Body::from(serde_json::to_vec(data).expect("serializing request body"));
        self
    }

    /// Attach a raw body; the caller sets the content type
    #[allow(dead_code)]
    pub fn body(mut self, body: &str) -> Self {
        self.body = Body::from(body.to_owned());
        self
    }

    /// Drive the request through the router and collect the response
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let request = self.request.body(self.body).expect("building request");
        let response = app.oneshot(request).await.expect("routing request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("reading response body")
            .to_vec();

        AxumTestResponse {
            status,
            headers,
            body,
        }
    }
}

/// A fully-read response: status, headers, and buffered body
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    /// Status code as a bare u16 for terse assertions
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// A response header, if present and valid UTF-8
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    }

    /// Deserialize the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).expect("deserializing response body")
    }

    /// The body as a UTF-8 string
    #[allow(dead_code)]
    pub fn text(self) -> String {
        String::from_utf8(self.body).expect("response body is not UTF-8")
    }
}
