//! Field and file validators
//!
//! Pattern checks for contact fields, logo file checks, and image dimension
//! checks. Patterns are compiled once on first use.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use receiptdesk_config::LogoConfig;
use receiptdesk_utils::format_file_size;

/// MIME types accepted for logos
pub const ALLOWED_LOGO_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/gif"];

fn forbidden_filename_chars() -> &'static Regex {
    static PATTERN: once_cell::sync::OnceCell<Regex> = once_cell::sync::OnceCell::new();
    PATTERN.get_or_init(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap())
}

/// Accepts `(555) 123-4567`, `555-123-4567`, `555.123.4567` and `5551234567`
pub fn validate_phone(phone: &str) -> bool {
    static PATTERN: once_cell::sync::OnceCell<Regex> = once_cell::sync::OnceCell::new();
    let regex = PATTERN.get_or_init(|| Regex::new(r"^\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}$").unwrap());
    regex.is_match(phone.trim())
}

pub fn validate_ein(ein: &str) -> bool {
    static PATTERN: once_cell::sync::OnceCell<Regex> = once_cell::sync::OnceCell::new();
    let regex = PATTERN.get_or_init(|| Regex::new(r"^\d{2}-\d{7}$").unwrap());
    regex.is_match(ein.trim())
}

pub fn validate_zip(zip: &str) -> bool {
    static PATTERN: once_cell::sync::OnceCell<Regex> = once_cell::sync::OnceCell::new();
    let regex = PATTERN.get_or_init(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());
    regex.is_match(zip.trim())
}

pub fn validate_email(email: &str) -> bool {
    static PATTERN: once_cell::sync::OnceCell<Regex> = once_cell::sync::OnceCell::new();
    let regex = PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    regex.is_match(email.trim())
}

pub fn validate_url(url: &str) -> bool {
    static PATTERN: once_cell::sync::OnceCell<Regex> = once_cell::sync::OnceCell::new();
    let regex = PATTERN.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap());
    regex.is_match(url.trim())
}

// ==================== Logo files ====================

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl LogoFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring its MIME type from the extension
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let bytes = std::fs::read(path).map_err(|_| CoreError::NotFound {
            resource: path.display().to_string(),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = match path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        };
        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Check a logo before upload. Size, type, name length and name characters
/// are checked in that order; the first failure is reported.
pub fn validate_logo_file(file: &LogoFile, limits: &LogoConfig) -> CoreResult<()> {
    if file.size() > limits.max_file_size {
        return Err(CoreError::validation(format!(
            "File is too large ({}). Maximum size is {}.",
            format_file_size(file.size()),
            format_file_size(limits.max_file_size)
        )));
    }

    if !ALLOWED_LOGO_TYPES.contains(&file.mime_type.to_lowercase().as_str()) {
        return Err(CoreError::validation(
            "Invalid file type. Please upload a PNG, JPEG, or GIF image.",
        ));
    }

    if file.name.chars().count() > limits.max_filename_len {
        return Err(CoreError::validation(format!(
            "Filename is too long. Maximum length is {} characters.",
            limits.max_filename_len
        )));
    }

    if forbidden_filename_chars().is_match(&file.name) {
        return Err(CoreError::validation("Filename contains invalid characters."));
    }

    Ok(())
}

// ==================== Image dimensions ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    fn exceeds(&self, limits: &LogoConfig) -> bool {
        self.width > limits.max_width || self.height > limits.max_height
    }
}

/// Decode just enough of the image to learn its size. Decoding runs on the
/// blocking pool.
pub async fn read_image_dimensions(bytes: Vec<u8>) -> CoreResult<ImageDimensions> {
    tokio::task::spawn_blocking(move || {
        let reader = image::ImageReader::new(std::io::Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CoreError::ImageError {
                message: e.to_string(),
            })?;
        let (width, height) = reader.into_dimensions().map_err(|e| CoreError::ImageError {
            message: e.to_string(),
        })?;
        Ok(ImageDimensions { width, height })
    })
    .await
    .map_err(|e| CoreError::InternalError {
        message: e.to_string(),
    })?
}

/// Preview-time check: an oversized image only earns a warning
pub fn preview_dimension_notice(dims: ImageDimensions, limits: &LogoConfig) -> Option<String> {
    if dims.exceeds(limits) {
        Some(format!(
            "Image is {}x{} pixels; images larger than {}x{} may be scaled down.",
            dims.width, dims.height, limits.max_width, limits.max_height
        ))
    } else {
        None
    }
}

/// Upload-time check: an oversized image is rejected, unlike the preview
/// check which only warns.
pub fn enforce_dimensions(dims: ImageDimensions, limits: &LogoConfig) -> CoreResult<()> {
    if dims.exceeds(limits) {
        Err(CoreError::validation(format!(
            "Image dimensions {}x{} exceed the maximum of {}x{} pixels.",
            dims.width, dims.height, limits.max_width, limits.max_height
        )))
    } else {
        Ok(())
    }
}

// ==================== Tests ====================
