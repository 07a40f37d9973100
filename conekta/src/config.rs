//! Client configuration for the Conekta API.
//!
//! The configuration is an explicitly constructed value owned by the
//! [`Client`](crate::client::Client) that uses it. Credentials never live in
//! process-wide state: build a [`Config`] once at startup and hand it to the
//! client.

use std::time::Duration;

use url::Url;

/// Default base URL of the Conekta API.
pub const DEFAULT_BASE_URL: &str = "https://api.conekta.io/";

/// API version sent in the `Accept` header of every request.
pub const API_VERSION: &str = "2.0.0";

/// Locale sent in the `Accept-Language` header of every request.
///
/// Controls the language of the human-readable `message` field in API error
/// details.
pub const LOCALE: &str = "es";

/// Configuration for a [`Client`](crate::client::Client).
///
/// Carries the private API key, the base URL, the API version and locale
/// headers, and an optional per-request timeout.
///
/// # Example
///
/// ```
/// use conekta::Config;
///
/// let config = Config::new("key_xxxxxxxxxxxxxxxx");
/// assert_eq!(config.api_version(), "2.0.0");
/// assert_eq!(config.locale(), "es");
/// ```
#[derive(Clone)]
pub struct Config {
    api_key: String,
    base_url: Url,
    api_version: String,
    locale: String,
    timeout: Option<Duration>,
}

impl Config {
    /// Creates a configuration for the given private API key, pointing at
    /// the production Conekta API.
    ///
    /// # Panics
    ///
    /// Panics if [`DEFAULT_BASE_URL`] fails to parse, which cannot happen.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_version: API_VERSION.to_owned(),
            locale: LOCALE.to_owned(),
            timeout: None,
        }
    }

    /// Returns the configured private API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the API version used for the `Accept` header.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the locale used for the `Accept-Language` header.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the per-request timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Overrides the base URL (e.g. to point at a test double).
    ///
    /// The stored URL always ends in `/` so that relative endpoint paths
    /// resolve under it rather than replacing its last segment.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = ensure_trailing_slash(base_url);
        self
    }

    /// Overrides the API version.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Overrides the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Sets a timeout applied to each request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("locale", &self.locale)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Appends a trailing `/` to the URL path if it is missing.
fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("key_abc");
        assert_eq!(config.api_key(), "key_abc");
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.api_version(), "2.0.0");
        assert_eq!(config.locale(), "es");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new("key_abc")
            .with_api_version("2.1.0")
            .with_locale("en")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_version(), "2.1.0");
        assert_eq!(config.locale(), "en");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let url = Url::parse("https://sandbox.example/v2").unwrap();
        let config = Config::new("key_abc").with_base_url(url);
        assert_eq!(config.base_url().as_str(), "https://sandbox.example/v2/");

        let joined = config.base_url().join("customers/cus_1").unwrap();
        assert_eq!(joined.as_str(), "https://sandbox.example/v2/customers/cus_1");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("key_supersecret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("[redacted]"));
    }
}
