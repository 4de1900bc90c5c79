//! Local image validation.
//!
//! All checks run against the local filesystem before any network call, so an
//! invalid file never costs backend quota or latency.

use gallerist_core::ImageFormat;
use gallerist_error::{ValidationError, ValidationErrorKind};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Maximum accepted file size: 5 MiB.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Longest magic-byte signature the formats use.
const SIGNATURE_LEN: usize = 4;

/// Validate an image file, collapsing every failure to `false`.
///
/// Rejections are logged at `warn` level; this function never errors. Checks
/// run in order and short-circuit: existence, size bounds, extension, and
/// magic-byte signature.
#[tracing::instrument]
pub async fn validate_image(path: &Path) -> bool {
    match check_image(path).await {
        Ok(_) => true,
        Err(error) => {
            tracing::warn!(error = %error, "image validation failed");
            false
        }
    }
}

/// Validate an image file, reporting the format on success.
///
/// Same checks as [`validate_image`], but surfaces the rejection reason and
/// the resolved [`ImageFormat`] for callers that need them (the upload
/// pipeline uses the format for the blob content type).
///
/// # Errors
///
/// Returns the first failed check as a [`ValidationError`].
pub async fn check_image(path: &Path) -> Result<ImageFormat, ValidationError> {
    let display = path.display().to_string();

    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|_| ValidationError::new(ValidationErrorKind::NotFound(display.clone())))?;
    if !meta.is_file() {
        return Err(ValidationError::new(ValidationErrorKind::NotFound(display)));
    }

    let size = meta.len();
    if size == 0 {
        return Err(ValidationError::new(ValidationErrorKind::Empty(display)));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::new(ValidationErrorKind::TooLarge(
            display, size,
        )));
    }

    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::UnsupportedExtension(display.clone()))
        })?;

    let header = read_header(path).await.map_err(|e| {
        ValidationError::new(ValidationErrorKind::NotFound(format!("{}: {}", display, e)))
    })?;
    if !format.matches_signature(&header) {
        return Err(ValidationError::new(
            ValidationErrorKind::SignatureMismatch(display),
        ));
    }

    Ok(format)
}

/// Read up to the first [`SIGNATURE_LEN`] bytes of a file.
async fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut header = [0u8; SIGNATURE_LEN];
    let mut filled = 0;
    while filled < SIGNATURE_LEN {
        let n = file.read(&mut header[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(header[..filled].to_vec())
}
