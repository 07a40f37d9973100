//! User-facing error payloads.
//!
//! Operations that fail hand the caller a [`UserError`]: a ready-to-serialize
//! payload with messages safe to show to an end user. API details (log ids,
//! debug messages, parameter names) never reach it; those go to the log.
//!
//! The JSON shape depends on how many messages there are: a lone message
//! serializes as `{"msg": ...}`, two or more as `{"errors": [...]}`.

use conekta::ApiError;
use serde::{Deserialize, Serialize};

/// Shown when a failure carries nothing the user can act on.
pub const UNKNOWN_ERROR_MESSAGE: &str =
    "Upps! Ocurrió un error desconocido, contacte a soporte técnico";

/// Shown when a payment source update request would change nothing.
pub const NO_CHANGE_MESSAGE: &str = "No se aplicó ningún cambio a la fuente de pago";

/// A user-facing error payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserError {
    /// A single message, serialized as `{"msg": ...}`.
    Single {
        /// The message.
        msg: String,
    },
    /// Several messages, serialized as `{"errors": [...]}`.
    Many {
        /// The messages, in the order the API reported them.
        errors: Vec<String>,
    },
}

impl UserError {
    /// Creates a single-message payload.
    #[must_use]
    pub fn single(msg: impl Into<String>) -> Self {
        Self::Single { msg: msg.into() }
    }

    /// Creates a multi-message payload.
    #[must_use]
    pub const fn many(errors: Vec<String>) -> Self {
        Self::Many { errors }
    }

    /// The fallback payload for failures with no user-facing explanation.
    #[must_use]
    pub fn unknown() -> Self {
        Self::single(UNKNOWN_ERROR_MESSAGE)
    }

    /// The payload for a payment source update that would change nothing.
    #[must_use]
    pub fn no_change() -> Self {
        Self::single(NO_CHANGE_MESSAGE)
    }

    /// Builds a payload from an API error envelope.
    ///
    /// One detail becomes [`UserError::Single`]; two or more become
    /// [`UserError::Many`] carrying every message. An envelope without
    /// details yields `None`, leaving the caller to fall back to
    /// [`UserError::unknown`].
    #[must_use]
    pub fn from_api(error: &ApiError) -> Option<Self> {
        let messages = error.messages();
        match messages.as_slice() {
            [] => None,
            [only] => Some(Self::single(*only)),
            _ => Some(Self::many(
                messages.into_iter().map(str::to_owned).collect(),
            )),
        }
    }

    /// Returns `true` for a [`UserError::Single`] payload.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::Single { .. })
    }

    /// Returns `true` for a [`UserError::Many`] payload.
    #[must_use]
    pub const fn is_many(&self) -> bool {
        matches!(self, Self::Many { .. })
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single { msg } => f.write_str(msg),
            Self::Many { errors } => f.write_str(&errors.join("; ")),
        }
    }
}

impl std::error::Error for UserError {}

#[cfg(test)]
mod tests {
    use super::*;
    use conekta::error::ErrorDetail;
    use serde_json::json;

    fn api_error(messages: &[&str]) -> ApiError {
        ApiError {
            object: "error".to_owned(),
            error_type: Some("parameter_validation_error".to_owned()),
            log_id: Some("log_1".to_owned()),
            details: messages
                .iter()
                .map(|m| ErrorDetail {
                    message: (*m).to_owned(),
                    ..ErrorDetail::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_serializes_as_msg_object() {
        assert_eq!(
            serde_json::to_value(UserError::single("La tarjeta fue declinada")).unwrap(),
            json!({"msg": "La tarjeta fue declinada"})
        );
    }

    #[test]
    fn test_many_serializes_as_errors_array() {
        assert_eq!(
            serde_json::to_value(UserError::many(vec!["uno".to_owned(), "dos".to_owned()]))
                .unwrap(),
            json!({"errors": ["uno", "dos"]})
        );
    }

    #[test]
    fn test_from_api_with_one_detail_is_single() {
        let payload = UserError::from_api(&api_error(&["La tarjeta fue declinada"])).unwrap();
        assert!(payload.is_single());
        assert_eq!(payload, UserError::single("La tarjeta fue declinada"));
    }

    #[test]
    fn test_from_api_keeps_every_message() {
        let payload = UserError::from_api(&api_error(&["uno", "dos", "tres"])).unwrap();
        assert!(payload.is_many());
        assert_eq!(
            payload,
            UserError::many(vec!["uno".to_owned(), "dos".to_owned(), "tres".to_owned()])
        );
    }

    #[test]
    fn test_from_api_without_details_is_none() {
        assert!(UserError::from_api(&api_error(&[])).is_none());
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            UserError::unknown(),
            UserError::single("Upps! Ocurrió un error desconocido, contacte a soporte técnico")
        );
        assert_eq!(
            UserError::no_change(),
            UserError::single("No se aplicó ningún cambio a la fuente de pago")
        );
    }
}
