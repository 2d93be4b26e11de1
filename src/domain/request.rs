use crate::domain::value::{MessageBody, RawPhoneNumber};

#[derive(Debug, Clone)]
/// One outbound SMS: a destination number and a message body.
///
/// Both parts are validated at construction of their value types; the byte
/// length bound depends on the account configuration and is enforced by the
/// client before the request goes on the wire.
pub struct SendMessage {
    to: RawPhoneNumber,
    body: MessageBody,
}

impl SendMessage {
    /// Assemble a send request from validated parts.
    pub fn new(to: RawPhoneNumber, body: MessageBody) -> Self {
        Self { to, body }
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }
}
