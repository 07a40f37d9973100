//! Error-normalizing gateway over the Conekta payments API.
//!
//! Host applications drive payment flows (customers, tokenized cards, plan
//! subscriptions) through [`PaymentsGateway`] and get back either the API
//! resource or a [`UserError`]: a ready-to-serialize payload whose messages
//! are safe to show an end user. Technical failure detail is logged via
//! [`tracing`], never surfaced.
//!
//! # Overview
//!
//! ```no_run
//! use conekta_gateway::{GatewayConfig, Mode, PaymentsGateway};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::new(Mode::Test, "key_xxxxxxxxxxxxxxxx", "");
//! let gateway = PaymentsGateway::new(&config)?;
//!
//! match gateway
//!     .add_customer_source("cus_2tKcHxhTz7xU5SymF", "tok_visa4242", true)
//!     .await
//! {
//!     Ok(source) => println!("attached {}", source.id),
//!     Err(payload) => println!("{}", serde_json::to_string(&payload)?),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Mode selection, key pair, and key validation
//! - [`gateway`] - The gateway operations
//! - [`message`] - User-facing error payloads

pub mod config;
pub mod gateway;
pub mod message;

pub use config::{ConfigError, GatewayConfig, Mode};
pub use gateway::{CustomerSources, PaymentsGateway};
pub use message::UserError;
