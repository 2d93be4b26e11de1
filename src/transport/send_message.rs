use crate::domain::{AccountSid, MessageBody, RawPhoneNumber, SendMessage, SenderNumber};

/// Messages API version segment of the endpoint path.
pub const API_VERSION: &str = "2010-04-01";

pub fn encode_send_message_form(
    request: &SendMessage,
    from: &SenderNumber,
) -> Vec<(String, String)> {
    vec![
        (
            RawPhoneNumber::FIELD.to_owned(),
            request.to().raw().to_owned(),
        ),
        (SenderNumber::FIELD.to_owned(), from.as_str().to_owned()),
        (
            MessageBody::FIELD.to_owned(),
            request.body().as_str().to_owned(),
        ),
    ]
}

/// Build the per-account Messages endpoint URL.
pub fn messages_url(api_base: &str, account_sid: &AccountSid) -> String {
    format!(
        "{}/{API_VERSION}/Accounts/{}/Messages.json",
        api_base.trim_end_matches('/'),
        account_sid.as_str()
    )
}

#[cfg(test)]
mod tests {
    use crate::domain::{AccountSid, MessageBody, RawPhoneNumber, SendMessage, SenderNumber};

    use super::*;

    #[test]
    fn form_carries_to_from_body_in_order() {
        let request = SendMessage::new(
            RawPhoneNumber::new("+12025550123").unwrap(),
            MessageBody::new("hello").unwrap(),
        );
        let from = SenderNumber::new("+15005550006").unwrap();

        let params = encode_send_message_form(&request, &from);
        assert_eq!(
            params,
            vec![
                ("To".to_owned(), "+12025550123".to_owned()),
                ("From".to_owned(), "+15005550006".to_owned()),
                ("Body".to_owned(), "hello".to_owned()),
            ]
        );
    }

    #[test]
    fn messages_url_embeds_version_and_account_sid() {
        let sid = AccountSid::new("AC123").unwrap();
        assert_eq!(
            messages_url("https://api.twilio.com", &sid),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn messages_url_tolerates_trailing_slash() {
        let sid = AccountSid::new("AC123").unwrap();
        assert_eq!(
            messages_url("https://example.invalid/", &sid),
            "https://example.invalid/2010-04-01/Accounts/AC123/Messages.json"
        );
    }
}
