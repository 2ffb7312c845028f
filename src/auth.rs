// ABOUTME: JWT validation for externally issued identity tokens
// ABOUTME: Extracts the authenticated user from the Authorization header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! # Authentication
//!
//! Ladle does not issue tokens. The external identity service signs HS256
//! JWTs with a shared secret; this module validates them and resolves the
//! requesting user. Endpoints that personalize public payloads use
//! [`AuthManager::optional_identity`], owner-restricted endpoints use
//! [`AuthManager::authenticate`].

use axum::http::HeaderMap;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::service_names;
use crate::errors::{AppError, AppResult};

/// JWT claims shared with the identity service
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Authentication result with the requesting user's identity
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Email carried by the token
    pub email: String,
}

/// Validates bearer tokens minted by the external identity service
pub struct AuthManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthManager {
    /// Create a validator for the given shared secret
    #[must_use]
    pub fn new(jwt_secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_audience(&[service_names::LADLE]);

        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret),
            validation,
        }
    }

    /// Validate a raw token string and return its claims
    ///
    /// # Errors
    ///
    /// Returns an `AuthExpired` error for expired tokens and an
    /// `AuthInvalid` error for every other validation failure.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::auth_expired(),
                    ErrorKind::InvalidAudience => {
                        AppError::auth_invalid("Token audience does not match this service")
                    }
                    _ => AppError::auth_invalid(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Authenticate a request from its headers
    ///
    /// # Errors
    ///
    /// Returns an `AuthRequired` error when no bearer token is present and
    /// an `AuthInvalid`/`AuthExpired` error when the token does not verify.
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let token = bearer_token(headers).ok_or_else(AppError::auth_required)?;
        let claims = self.validate_token(token)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))?;

        Ok(AuthResult {
            user_id,
            email: claims.email,
        })
    }

    /// Resolve the requesting identity if a bearer token is present.
    ///
    /// Anonymous requests resolve to `Ok(None)`; a present-but-invalid
    /// token is still an error.
    ///
    /// # Errors
    ///
    /// Returns an `AuthInvalid`/`AuthExpired` error when a supplied token
    /// does not verify.
    pub fn optional_identity(&self, headers: &HeaderMap) -> AppResult<Option<AuthResult>> {
        if bearer_token(headers).is_none() {
            return Ok(None);
        }
        self.authenticate(headers).map(Some)
    }
}

/// Extract the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
