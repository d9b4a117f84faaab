//! Storage API configuration.
//!
//! The only setting is the API base URL.  It is looked up in order:
//!
//! 1. `window.BUCKETDROP_API_URL`, set by the hosting page before the
//!    app loads;
//! 2. the `BUCKETDROP_API_URL` environment variable at build time;
//! 3. [`DEFAULT_API_URL`].

use reqwest::Url;

/// Name of the build-time environment variable and of the runtime
/// `window` global that override the API base URL.
pub const API_URL_VAR: &str = "BUCKETDROP_API_URL";

/// Base URL used when nothing overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Path appended to the base URL for uploads.
const UPLOAD_PATH: &str = "/v1/files";

/// Errors that can occur when resolving the API configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is not an absolute `http`/`https` URL.
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Validated configuration for [`UploadClient`](crate::UploadClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
}

impl ClientConfig {
    /// Create a configuration from a base URL such as
    /// `https://files.example.com/api`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` does not
    /// parse or is not `http`/`https`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Self { base_url: url }),
            other => Err(invalid(format!("unsupported scheme {other:?}"))),
        }
    }

    /// Resolve the configuration from the hosting page or build
    /// environment (see the [module docs](self)).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the resolved value is
    /// not a valid base URL.
    pub fn from_environment() -> Result<Self, ConfigError> {
        let base_url = runtime_override()
            .or_else(|| option_env!("BUCKETDROP_API_URL").map(str::to_owned))
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Self::new(&base_url)
    }

    /// The API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of the upload endpoint, `{base-url}/v1/files`.
    #[must_use]
    pub fn upload_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{UPLOAD_PATH}")
    }
}

/// Read a non-empty string from `window.BUCKETDROP_API_URL`.
///
/// Returns `None` outside the browser or when the global is absent.
#[cfg(target_arch = "wasm32")]
fn runtime_override() -> Option<String> {
    let window = web_sys::window()?;
    let value =
        js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str(API_URL_VAR)).ok()?;
    value.as_string().filter(|s| !s.trim().is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
const fn runtime_override() -> Option<String> {
    None
}
