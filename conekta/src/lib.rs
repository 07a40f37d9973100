//! Typed async client for the Conekta payments API.
//!
//! This crate covers the customer-centric slice of the Conekta v2.0.0 API:
//! customers, their payment sources, and plan subscriptions. Requests
//! authenticate with a private API key over HTTP Basic auth and negotiate
//! the API version and response language through headers.
//!
//! # Overview
//!
//! Build a [`Config`] with your private key, hand it to a [`Client`], and
//! call one typed method per API operation. Failures surface as [`Error`],
//! which distinguishes transport problems from structured [`ApiError`]
//! envelopes returned by the API itself.
//!
//! ```no_run
//! use conekta::{Client, Config};
//! use conekta::resources::CustomerRequest;
//!
//! # async fn demo() -> Result<(), conekta::Error> {
//! let client = Client::new(Config::new("key_xxxxxxxxxxxxxxxx"));
//! let customer = client
//!     .create_customer(&CustomerRequest::new("Fulanito Pérez", "fulanito@conekta.com"))
//!     .await?;
//! println!("created {}", customer.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - Async HTTP client with one typed method per API operation
//! - [`config`] - Credentials, base URL, API version and locale
//! - [`error`] - Transport errors and the structured API error envelope
//! - [`resources`] - Request and response payload types

pub mod client;
pub mod config;
pub mod error;
pub mod resources;

pub use client::Client;
pub use config::Config;
pub use error::{ApiError, Error};
