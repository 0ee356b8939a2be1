//! Upload validation.

use image::ImageFormat;

use crate::multipart::Part;

/// Default file size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Declared MIME types we accept.
pub const ALLOWED_MIME: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// A request rejected before any processing ran.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// No `image` field in the upload.
    #[error("no image file was uploaded")]
    NoImage,

    /// Declared content type outside the allow list.
    #[error("unsupported content type: {0:?}")]
    InvalidType(String),

    /// The file exceeds the configured size ceiling.
    #[error("file exceeds the {0} byte upload limit")]
    FileTooLarge(usize),

    /// The request body could not be read or parsed.
    #[error("malformed upload: {0}")]
    Upload(String),

    /// The bytes are not a PNG, JPEG or WEBP image.
    #[error("uploaded data is not a supported image")]
    InvalidFile,
}

impl RequestError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoImage => "NO_IMAGE",
            Self::InvalidType(_) => "INVALID_TYPE",
            Self::FileTooLarge(_) => "FILE_TOO_LARGE",
            Self::Upload(_) => "UPLOAD_ERROR",
            Self::InvalidFile => "INVALID_FILE",
        }
    }

    /// HTTP status for the error envelope.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::NoImage | Self::InvalidType(_) | Self::FileTooLarge(_) | Self::Upload(_) => 400,
            Self::InvalidFile => 415,
        }
    }
}

/// Check an uploaded part: size ceiling, declared MIME allow list,
/// then magic bytes. The declared type is client-controlled, so the
/// magic-byte check is what actually gates processing. The ceiling is
/// the configured per-process limit, [`MAX_UPLOAD_BYTES`] unless
/// overridden.
pub fn validate_upload(part: &Part, max_bytes: usize) -> Result<(), RequestError> {
    if part.data.is_empty() {
        return Err(RequestError::NoImage);
    }
    if part.data.len() > max_bytes {
        return Err(RequestError::FileTooLarge(max_bytes));
    }
    let declared = part.content_type.as_deref().unwrap_or("");
    if !ALLOWED_MIME.contains(&declared) {
        return Err(RequestError::InvalidType(declared.to_owned()));
    }
    match image::guess_format(&part.data) {
        Ok(ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP) => Ok(()),
        _ => Err(RequestError::InvalidFile),
    }
}
