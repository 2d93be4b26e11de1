//! Minimal typed client for sending SMS through the Twilio Messages API.
//!
//! The design has three layers: a domain layer of strong types, a transport
//! layer for wire-format details, and a small client layer orchestrating the
//! authenticated request and its rate-limit retry loop. Response bodies are
//! never parsed; the HTTP status line alone decides the outcome.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use twilite::{Config, MessageBody, RawPhoneNumber, SendMessage, TwilioClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twilite::TwilioError> {
//!     let config = Config::new(
//!         "AC...",
//!         "auth-token",
//!         "+15005550006",
//!         Duration::from_secs(5),
//!         true,
//!     )?;
//!     let client = TwilioClient::new(config);
//!     let to = RawPhoneNumber::new("+12025550123")?;
//!     let body = MessageBody::new("hello")?;
//!     client.send_message(SendMessage::new(to, body)).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    CONCATENATED_MESSAGE_MAX_BYTES, Config, SINGLE_MESSAGE_MAX_BYTES, TwilioClient,
    TwilioClientBuilder, TwilioError,
};
pub use domain::{
    AccountSid, AuthToken, MessageBody, PhoneNumber, RawPhoneNumber, SendMessage, SenderNumber,
    ValidationError,
};
