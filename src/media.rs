// ABOUTME: Recipe image intake - base64 data-URI parsing and media directory storage
// ABOUTME: Accepts inline data URIs or multipart file parts, writes UUID-named files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Recipe image handling.
//!
//! Clients may submit an image either as an inline
//! `data:image/<ext>;base64,<payload>` string in the JSON body or as a
//! multipart file part. Both paths decode into [`DecodedImage`] and are
//! stored under `<media_dir>/recipes/images/<uuid>.<ext>`.

use std::path::Path;

use base64::{engine::general_purpose, Engine};
use tokio::fs;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Directory for stored recipe images, relative to the media root
const IMAGE_SUBDIR: &str = "recipes/images";

/// Longest accepted image extension
const MAX_EXTENSION_LEN: usize = 8;

/// A decoded image ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// File extension declared by the client (lowercased)
    pub extension: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// Decode an inline `data:image/<ext>;base64,<payload>` URI
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the string is not an image data
    /// URI, declares an unusable extension, or carries invalid base64.
    pub fn from_data_uri(data: &str) -> AppResult<Self> {
        let rest = data.strip_prefix("data:image/").ok_or_else(|| {
            AppError::invalid_input("Image must be a data:image/<ext>;base64 URI")
        })?;

        let (extension, payload) = rest.split_once(";base64,").ok_or_else(|| {
            AppError::invalid_input("Image data URI is missing the base64 payload")
        })?;

        let extension = sanitize_extension(extension)?;

        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| AppError::invalid_input(format!("Invalid base64 image payload: {e}")))?;

        Ok(Self { extension, bytes })
    }

    /// Build from a multipart file part's declared content type
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the content type is not an image
    /// type or declares an unusable extension.
    pub fn from_mime(content_type: &str, bytes: Vec<u8>) -> AppResult<Self> {
        let extension = content_type
            .strip_prefix("image/")
            .ok_or_else(|| AppError::invalid_input("Image upload must have an image/* content type"))?;
        let extension = sanitize_extension(extension)?;
        Ok(Self { extension, bytes })
    }
}

// The extension lands in a filename; restrict it to a short alphanumeric token.
fn sanitize_extension(extension: &str) -> AppResult<String> {
    let extension = extension.trim().to_lowercase();
    if extension.is_empty()
        || extension.len() > MAX_EXTENSION_LEN
        || !extension.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(AppError::invalid_input(format!(
            "Unsupported image extension: {extension:?}"
        )));
    }
    Ok(extension)
}

/// Store a decoded image under the media directory.
///
/// Returns the media-relative path recorded on the recipe.
///
/// # Errors
///
/// Returns a `StorageError` when the media directory cannot be created or
/// the file cannot be written.
pub async fn store_image(media_dir: &Path, image: &DecodedImage) -> AppResult<String> {
    let relative = format!("{IMAGE_SUBDIR}/{}.{}", Uuid::new_v4(), image.extension);
    let full_path = media_dir.join(&relative);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create media directory: {e}")))?;
    }

    fs::write(&full_path, &image.bytes)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write image file: {e}")))?;

    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_data_uri() {
        let payload = general_purpose::STANDARD.encode(b"fake png bytes");
        let uri = format!("data:image/png;base64,{payload}");
        let image = DecodedImage::from_data_uri(&uri).unwrap();
        assert_eq!(image.extension, "png");
        assert_eq!(image.bytes, b"fake png bytes");
    }

    #[test]
    fn test_reject_non_image_uri() {
        assert!(DecodedImage::from_data_uri("data:text/plain;base64,aGk=").is_err());
        assert!(DecodedImage::from_data_uri("not a data uri").is_err());
    }

    #[test]
    fn test_reject_missing_base64_marker() {
        assert!(DecodedImage::from_data_uri("data:image/png,rawbytes").is_err());
    }

    #[test]
    fn test_reject_invalid_base64() {
        assert!(DecodedImage::from_data_uri("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn test_reject_hostile_extension() {
        let payload = general_purpose::STANDARD.encode(b"x");
        let uri = format!("data:image/..%2Fetc;base64,{payload}");
        assert!(DecodedImage::from_data_uri(&uri).is_err());
    }

    #[test]
    fn test_from_mime() {
        let image = DecodedImage::from_mime("image/jpeg", vec![1, 2, 3]).unwrap();
        assert_eq!(image.extension, "jpeg");
        assert!(DecodedImage::from_mime("application/pdf", vec![]).is_err());
    }

    #[tokio::test]
    async fn test_store_image_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = DecodedImage {
            extension: "png".into(),
            bytes: b"pixels".to_vec(),
        };

        let relative = store_image(dir.path(), &image).await.unwrap();
        assert!(relative.starts_with("recipes/images/"));
        assert!(relative.ends_with(".png"));

        let stored = tokio::fs::read(dir.path().join(&relative)).await.unwrap();
        assert_eq!(stored, b"pixels");
    }
}
