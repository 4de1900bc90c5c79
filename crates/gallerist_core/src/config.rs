//! Backend configuration loaded from the environment.

use gallerist_error::{ConfigError, GalleristResult};

/// Environment variable naming the hosted backend base URL.
pub const ENV_BACKEND_URL: &str = "GALLERIST_BACKEND_URL";
/// Environment variable holding the backend API key.
pub const ENV_BACKEND_KEY: &str = "GALLERIST_BACKEND_KEY";
/// Environment variable overriding the blob storage bucket.
pub const ENV_BUCKET: &str = "GALLERIST_BUCKET";
/// Environment variable overriding the tracking record table.
pub const ENV_TABLE: &str = "GALLERIST_TABLE";

const DEFAULT_BUCKET: &str = "generated-images";
const DEFAULT_TABLE: &str = "generated_images";

/// Connection settings for the hosted record store and blob storage.
///
/// The URL and API key are required; bucket and table names fall back to
/// defaults. Construct explicitly for tests, or from the environment for
/// production use:
///
/// ```no_run
/// use gallerist_core::BackendConfig;
///
/// let config = BackendConfig::from_env()?;
/// # Ok::<(), gallerist_error::GalleristError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Backend base URL, without trailing slash
    pub url: String,
    /// API key sent as both `apikey` and bearer token
    pub api_key: String,
    /// Blob storage bucket for published images
    pub bucket: String,
    /// Record table tracking uploads
    pub table: String,
}

impl BackendConfig {
    /// Create a configuration with default bucket and table names.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        Self {
            url,
            api_key: api_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Load configuration from the environment, reading `.env` if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if [`ENV_BACKEND_URL`] or [`ENV_BACKEND_KEY`]
    /// is missing. Absence of either is a fatal startup condition for the
    /// pipeline.
    pub fn from_env() -> GalleristResult<Self> {
        let _ = dotenvy::dotenv();

        let url = std::env::var(ENV_BACKEND_URL)
            .map_err(|_| ConfigError::new(format!("{} is not set", ENV_BACKEND_URL)))?;
        let api_key = std::env::var(ENV_BACKEND_KEY)
            .map_err(|_| ConfigError::new(format!("{} is not set", ENV_BACKEND_KEY)))?;

        let mut config = Self::new(url, api_key);
        if let Ok(bucket) = std::env::var(ENV_BUCKET) {
            config.bucket = bucket;
        }
        if let Ok(table) = std::env::var(ENV_TABLE) {
            config.table = table;
        }

        tracing::info!(
            url = %config.url,
            bucket = %config.bucket,
            table = %config.table,
            "Loaded backend configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = BackendConfig::new("https://backend.example/", "key");
        assert_eq!(config.url, "https://backend.example");
    }

    #[test]
    fn defaults_apply() {
        let config = BackendConfig::new("https://backend.example", "key");
        assert_eq!(config.bucket, "generated-images");
        assert_eq!(config.table, "generated_images");
    }

    // Single test for all phases so the env mutations cannot race siblings.
    #[test]
    fn from_env_requires_url_and_key() {
        use gallerist_error::GalleristErrorKind;

        std::env::remove_var(ENV_BACKEND_URL);
        std::env::remove_var(ENV_BACKEND_KEY);
        let err = BackendConfig::from_env().unwrap_err();
        assert!(matches!(err.kind(), GalleristErrorKind::Config(_)));
        assert!(err.to_string().contains(ENV_BACKEND_URL));

        std::env::set_var(ENV_BACKEND_URL, "https://backend.example");
        let err = BackendConfig::from_env().unwrap_err();
        assert!(matches!(err.kind(), GalleristErrorKind::Config(_)));
        assert!(err.to_string().contains(ENV_BACKEND_KEY));

        std::env::set_var(ENV_BACKEND_KEY, "secret");
        let config = BackendConfig::from_env().unwrap();
        assert_eq!(config.url, "https://backend.example");
        assert_eq!(config.api_key, "secret");

        std::env::remove_var(ENV_BACKEND_URL);
        std::env::remove_var(ENV_BACKEND_KEY);
    }
}
