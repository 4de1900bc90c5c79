//! Upload status enumeration.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a tracked upload.
///
/// A record is created as `Uploading` and transitions exactly once, to either
/// `Completed` or `Error`. Terminal states are never revisited.
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
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    /// Record created, transfer in progress
    #[display("uploading")]
    Uploading,
    /// Bytes published and public locator resolved
    #[display("completed")]
    Completed,
    /// Upload failed after retries were exhausted
    #[display("error")]
    Error,
}

impl ImageStatus {
    /// Convert to string representation for backend storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStatus::Uploading => "uploading",
            ImageStatus::Completed => "completed",
            ImageStatus::Error => "error",
        }
    }

    /// Whether this status is terminal (`completed` or `error`).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ImageStatus::Uploading)
    }
}

impl std::str::FromStr for ImageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploading" => Ok(ImageStatus::Uploading),
            "completed" => Ok(ImageStatus::Completed),
            "error" => Ok(ImageStatus::Error),
            _ => Err(format!("Unknown image status: {}", s)),
        }
    }
}
