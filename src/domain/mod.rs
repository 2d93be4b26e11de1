//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod validation;
mod value;

pub use request::SendMessage;
pub use validation::ValidationError;
pub use value::{
    AccountSid, AuthToken, MessageBody, PhoneNumber, RawPhoneNumber, SenderNumber,
};
