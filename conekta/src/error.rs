//! Error types for the Conekta client.
//!
//! Two layers of failure are distinguished:
//!
//! - [`ApiError`]: a structured error envelope returned by the Conekta API
//!   itself (`"object": "error"`), carrying one detail per rejected field.
//! - [`Error`]: everything that can go wrong while performing a request,
//!   including transport failures, undecodable bodies, and [`ApiError`]
//!   responses.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_with::{VecSkipError, serde_as};

/// A single entry in the `details` array of an [`ApiError`].
///
/// `message` is the human-readable text in the language requested via
/// `Accept-Language`; `debug_message` is an English developer-facing
/// explanation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message, localized.
    #[serde(default)]
    pub message: String,
    /// Developer-facing explanation of the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_message: Option<String>,
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Name of the request parameter the detail refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// Structured error envelope returned by the Conekta API.
///
/// Error responses carry `"object": "error"` alongside a classification
/// (`type`), a support reference (`log_id`), and a list of [`ErrorDetail`]
/// entries. Malformed entries in `details` are skipped rather than failing
/// the whole envelope.
#[serde_as]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiError {
    /// Object discriminator, `"error"` for this envelope.
    #[serde(default)]
    pub object: String,
    /// Error classification, e.g. `parameter_validation_error`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Reference for support requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    /// One entry per rejected field or failure cause.
    #[serde_as(as = "VecSkipError<_>")]
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

impl ApiError {
    /// Parses an error envelope out of a raw response body.
    ///
    /// Returns `None` if the body is not JSON or is JSON for some other
    /// object kind, so callers can fall back to treating the response as an
    /// opaque status failure.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        let error: Self = serde_json::from_str(body).ok()?;
        (error.object == "error").then_some(error)
    }

    /// Returns the localized messages of all details, in response order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.details.iter().map(|d| d.message.as_str()).collect()
    }

    /// Returns the developer-facing explanations of all details, falling
    /// back to the localized message where `debug_message` is absent.
    #[must_use]
    pub fn debug_messages(&self) -> Vec<&str> {
        self.details
            .iter()
            .map(|d| d.debug_message.as_deref().unwrap_or(&d.message))
            .collect()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.details.is_empty() {
            match &self.error_type {
                Some(error_type) => write!(f, "API error of type {error_type} with no details"),
                None => write!(f, "API error with no details"),
            }
        } else {
            write!(f, "{}", self.messages().join("; "))
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors that can occur while performing a request against the Conekta API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// HTTP transport error.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// JSON deserialization error.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The API rejected the request with a structured error envelope.
    #[error("API error {status}: {context}: {error}")]
    Api {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The parsed error envelope.
        #[source]
        error: ApiError,
    },
    /// Unexpected HTTP status code with a body that is not an error envelope.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
    /// Failed to read response body.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// Returns the structured API error, if this is an [`Error::Api`].
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}
