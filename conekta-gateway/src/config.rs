//! Gateway configuration.
//!
//! A gateway carries one key pair (test and live) and a [`Mode`] selecting
//! which of the two is active. Only the active key is validated: a deployment
//! running in test mode may leave the live key unset.
//!
//! Configuration is an explicit value. Embed [`GatewayConfig`] in the host
//! application's own configuration (it derives serde traits), or load it from
//! the process environment with [`GatewayConfig::from_env`].
//!
//! # Environment Variables
//!
//! - `CONEKTA_MODE` — `test` or `live` (required)
//! - `CONEKTA_TEST_KEY` — private key for test mode
//! - `CONEKTA_LIVE_KEY` — private key for live mode

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Shape every Conekta private key follows: a `key_` prefix and an
/// alphanumeric body.
static KEY_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^key_[a-zA-Z0-9]+$").expect("key pattern is valid"));

/// Which of the two configured keys the gateway uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Sandbox environment, no real charges.
    Test,
    /// Production environment.
    Live,
}

impl Mode {
    /// Returns `true` for [`Mode::Live`].
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Self::Test),
            "live" => Ok(Self::Live),
            _ => Err(ConfigError::InvalidMode),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Test => f.write_str("test"),
            Self::Live => f.write_str("live"),
        }
    }
}

/// Key pair and mode for a gateway.
///
/// `Debug` output redacts both keys.
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Which key is active.
    pub mode: Mode,
    /// Private key for test mode.
    #[serde(default)]
    pub test_key: String,
    /// Private key for live mode.
    #[serde(default)]
    pub live_key: String,
}

impl GatewayConfig {
    /// Creates a configuration from explicit values.
    #[must_use]
    pub fn new(mode: Mode, test_key: impl Into<String>, live_key: impl Into<String>) -> Self {
        Self {
            mode,
            test_key: test_key.into(),
            live_key: live_key.into(),
        }
    }

    /// Loads configuration from the process environment.
    ///
    /// `CONEKTA_MODE` is required; missing key variables default to empty
    /// strings and are caught by [`GatewayConfig::validate`] when active.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `CONEKTA_MODE` is unset or not a valid
    /// [`Mode`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode = std::env::var("CONEKTA_MODE")
            .map_err(|_| ConfigError::MissingEnv {
                name: "CONEKTA_MODE",
            })?
            .parse()?;
        Ok(Self {
            mode,
            test_key: std::env::var("CONEKTA_TEST_KEY").unwrap_or_default(),
            live_key: std::env::var("CONEKTA_LIVE_KEY").unwrap_or_default(),
        })
    }

    /// Checks that the key selected by [`GatewayConfig::mode`] is a
    /// well-formed private key. The inactive key is not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLiveKey`] or
    /// [`ConfigError::InvalidTestKey`] for the active mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            Mode::Live if !KEY_FORMAT.is_match(&self.live_key) => Err(ConfigError::InvalidLiveKey),
            Mode::Test if !KEY_FORMAT.is_match(&self.test_key) => Err(ConfigError::InvalidTestKey),
            Mode::Live | Mode::Test => Ok(()),
        }
    }

    /// Returns the key selected by the configured mode.
    #[must_use]
    pub fn active_key(&self) -> &str {
        match self.mode {
            Mode::Live => &self.live_key,
            Mode::Test => &self.test_key,
        }
    }

    /// Builds client credentials from the active key.
    #[must_use]
    pub fn credentials(&self) -> conekta::Config {
        conekta::Config::new(self.active_key())
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("mode", &self.mode)
            .field("test_key", &"[redacted]")
            .field("live_key", &"[redacted]")
            .finish()
    }
}

/// Errors raised while building or validating a [`GatewayConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The mode string is neither `test` nor `live`.
    #[error("The mode must be test or live")]
    InvalidMode,
    /// Live mode is active but the live key is malformed or unset.
    #[error("The live key is not valid, please check it")]
    InvalidLiveKey,
    /// Test mode is active but the test key is malformed or unset.
    #[error("The test key provided is not valid, please check it")]
    InvalidTestKey,
    /// A required environment variable is unset.
    #[error("The {name} environment variable is not set")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
}
