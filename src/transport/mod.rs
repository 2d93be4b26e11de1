//! Transport layer: wire-format details (form encoding and endpoint URLs).

mod send_message;

pub use send_message::{encode_send_message_form, messages_url};
