//! Supported image format enumeration.

/// Image formats accepted by the upload pipeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum ImageFormat {
    /// PNG image
    #[display("png")]
    Png,
    /// JPEG image (`.jpg` or `.jpeg`)
    #[display("jpeg")]
    Jpeg,
    /// GIF image
    #[display("gif")]
    Gif,
}

impl ImageFormat {
    /// Resolve a format from a file extension, case-insensitively.
    ///
    /// Returns `None` for extensions the pipeline does not accept.
    ///
    /// # Examples
    ///
    /// ```
    /// use gallerist_core::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::Png));
    /// assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
    /// assert_eq!(ImageFormat::from_extension("webp"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    /// MIME type used when publishing bytes to blob storage.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Check whether the leading bytes of a file carry this format's signature.
    ///
    /// PNG files start with `89 50 4E 47`, JPEG files with `FF D8`, and GIF
    /// files with `GIF8`. A header shorter than the signature never matches.
    pub fn matches_signature(&self, header: &[u8]) -> bool {
        match self {
            ImageFormat::Png => header.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
            ImageFormat::Jpeg => header.starts_with(&[0xFF, 0xD8]),
            ImageFormat::Gif => header.starts_with(&[0x47, 0x49, 0x46, 0x38]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(ImageFormat::from_extension("Png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("GIF"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_extension("bmp"), None);
    }

    #[test]
    fn signatures_match_only_their_format() {
        let png = [0x89, 0x50, 0x4E, 0x47];
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0];
        let gif = *b"GIF8";

        assert!(ImageFormat::Png.matches_signature(&png));
        assert!(!ImageFormat::Png.matches_signature(&jpeg));
        assert!(ImageFormat::Jpeg.matches_signature(&jpeg));
        assert!(!ImageFormat::Jpeg.matches_signature(&gif));
        assert!(ImageFormat::Gif.matches_signature(&gif));
        assert!(!ImageFormat::Gif.matches_signature(&png));
    }

    #[test]
    fn short_header_never_matches() {
        assert!(!ImageFormat::Png.matches_signature(&[0x89, 0x50]));
        assert!(ImageFormat::Jpeg.matches_signature(&[0xFF, 0xD8]));
        assert!(!ImageFormat::Jpeg.matches_signature(&[0xFF]));
    }
}
