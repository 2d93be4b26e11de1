use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio Account SID.
///
/// Invariant: non-empty after trimming. Appears in the endpoint path and as
/// the Basic auth username.
pub struct AccountSid(String);

impl AccountSid {
    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "account sid",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated SID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Twilio auth token, used as the Basic auth password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
///
/// The token is opaque: it has no `Display` impl, its `Debug` output is
/// redacted, and nothing in this crate ever writes it to a log line or an
/// error message.
pub struct AuthToken(String);

impl AuthToken {
    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty {
                field: "auth token",
            });
        }
        Ok(Self(value))
    }

    /// Borrow the token for authenticating a request.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// The sender phone number (`From`) messages are delivered from.
///
/// Invariant: non-empty after trimming. The number must be provisioned on
/// your Twilio account.
pub struct SenderNumber(String);

impl SenderNumber {
    /// Form field name used by the Messages API (`From`).
    pub const FIELD: &'static str = "From";

    /// Create a validated [`SenderNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "sender phone number",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`Body`).
///
/// Invariant: non-empty after trimming. The original value (including
/// whitespace) is preserved. The length bound is a property of the account
/// configuration and is enforced by the client at send time.
pub struct MessageBody(String);

impl MessageBody {
    /// Form field name used by the Messages API (`Body`).
    pub const FIELD: &'static str = "Body";

    /// Create a validated message body.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: "message" });
        }
        Ok(Self(value))
    }

    /// Borrow the body as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Body length in raw bytes, the unit the Messages API limit is
    /// expressed in.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the body is empty. A validated body never is.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated destination phone number as sent to Twilio (`To`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you
/// want E.164 normalization, parse into [`PhoneNumber`] and convert it into
/// [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by the Messages API (`To`).
    pub const FIELD: &'static str = "To";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "phone number",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Twilio.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit
    /// country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: "phone number",
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let sid = AccountSid::new("  AC123 ").unwrap();
        assert_eq!(sid.as_str(), "AC123");
        assert!(AccountSid::new("  ").is_err());

        let token = AuthToken::new(" secret ").unwrap();
        assert_eq!(token.as_str(), " secret ");
        assert!(AuthToken::new("").is_err());

        let from = SenderNumber::new(" +15005550006 ").unwrap();
        assert_eq!(from.as_str(), "+15005550006");
        assert!(SenderNumber::new("").is_err());

        let body = MessageBody::new(" hi ").unwrap();
        assert_eq!(body.as_str(), " hi ");
        assert_eq!(body.len(), 4);
        assert!(MessageBody::new("  ").is_err());
    }

    #[test]
    fn auth_token_debug_is_redacted() {
        let token = AuthToken::new("super-secret").unwrap();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret"));
        assert_eq!(rendered, "AuthToken(<redacted>)");
    }

    #[test]
    fn message_body_length_counts_bytes_not_chars() {
        let body = MessageBody::new("héllo").unwrap();
        assert_eq!(body.as_str().chars().count(), 5);
        assert_eq!(body.len(), 6);
    }

    #[test]
    fn raw_phone_number_trims_and_exposes_raw() {
        let raw = RawPhoneNumber::new(" +15005550001 ").unwrap();
        assert_eq!(raw.raw(), "+15005550001");
        assert!(RawPhoneNumber::new("").is_err());
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+12025550123").unwrap();
        let p2 = PhoneNumber::parse(None, "+1 202 555-0123").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+12025550123");
        assert_eq!(p1.raw(), "+12025550123");

        let raw: RawPhoneNumber = p1.clone().into();
        assert_eq!(raw.raw(), "+12025550123");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn empty_inputs_render_exact_messages() {
        let err = RawPhoneNumber::new("   ").unwrap_err();
        assert_eq!(err.to_string(), "no phone number specified");

        let err = MessageBody::new("").unwrap_err();
        assert_eq!(err.to_string(), "no message specified");
    }
}
