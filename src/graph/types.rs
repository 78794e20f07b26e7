use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

/// `GET .../tables/{table}/rows` envelope.
#[derive(Debug, Deserialize)]
pub struct RowsEnvelope {
    #[serde(default)]
    pub value: Vec<RowEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RowEntry {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Body of `POST /users`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub account_enabled: bool,
    pub display_name: String,
    pub given_name: String,
    pub surname: String,
    pub mail_nickname: String,
    pub user_principal_name: String,
    pub job_title: String,
    pub department: String,
    pub password_profile: PasswordProfile,
}

#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordProfile {
    pub force_change_password_next_sign_in: bool,
    pub password: String,
}

impl std::fmt::Debug for PasswordProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordProfile")
            .field(
                "force_change_password_next_sign_in",
                &self.force_change_password_next_sign_in,
            )
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /users/{mailbox}/sendMail`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMail {
    pub message: Message,
    pub save_to_sent_items: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub subject: String,
    pub body: ItemBody,
    pub to_recipients: Vec<Recipient>,
    pub from: Recipient,
    pub internet_message_headers: Vec<MessageHeader>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: EmailAddress,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmailAddress {
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

impl Recipient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            email_address: EmailAddress {
                address: address.into(),
            },
        }
    }
}

impl SendMail {
    /// An encrypted HTML message to a single recipient, kept in Sent Items.
    pub fn html(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            message: Message {
                subject: subject.into(),
                body: ItemBody {
                    content_type: "HTML".to_string(),
                    content: content.into(),
                },
                to_recipients: vec![Recipient::new(to)],
                from: Recipient::new(from),
                internet_message_headers: vec![MessageHeader {
                    name: "X-Encrypt".to_string(),
                    value: "true".to_string(),
                }],
            },
            save_to_sent_items: "true".to_string(),
        }
    }

    pub fn recipient(&self) -> Option<&str> {
        self.message
            .to_recipients
            .first()
            .map(|r| r.email_address.address.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_user_wire_format() {
        let user = NewUser {
            account_enabled: true,
            display_name: "Anna Bianchi".into(),
            given_name: "Anna".into(),
            surname: "Bianchi".into(),
            mail_nickname: "anna.bianchi".into(),
            user_principal_name: "anna.bianchi@ldv-muenchen.de".into(),
            job_title: "Student".into(),
            department: "5A".into(),
            password_profile: PasswordProfile {
                force_change_password_next_sign_in: true,
                password: "ABC123!@#".into(),
            },
        };

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({
                "accountEnabled": true,
                "displayName": "Anna Bianchi",
                "givenName": "Anna",
                "surname": "Bianchi",
                "mailNickname": "anna.bianchi",
                "userPrincipalName": "anna.bianchi@ldv-muenchen.de",
                "jobTitle": "Student",
                "department": "5A",
                "passwordProfile": {
                    "forceChangePasswordNextSignIn": true,
                    "password": "ABC123!@#"
                }
            })
        );
        assert!(!format!("{:?}", user).contains("ABC123"));
    }

    #[test]
    fn test_send_mail_wire_format() {
        let mail = SendMail::html("it-admin@ldv-muenchen.de", "p@example.com", "Hi", "<p>x</p>");

        assert_eq!(
            serde_json::to_value(&mail).unwrap(),
            json!({
                "message": {
                    "subject": "Hi",
                    "body": { "contentType": "HTML", "content": "<p>x</p>" },
                    "toRecipients": [{ "emailAddress": { "address": "p@example.com" } }],
                    "from": { "emailAddress": { "address": "it-admin@ldv-muenchen.de" } },
                    "internetMessageHeaders": [{ "name": "X-Encrypt", "value": "true" }]
                },
                "saveToSentItems": "true"
            })
        );
        assert_eq!(mail.recipient(), Some("p@example.com"));
    }

    #[test]
    fn test_rows_envelope_parses() {
        let env: RowsEnvelope = serde_json::from_value(json!({
            "@odata.context": "ignored",
            "value": [{ "index": 0, "values": [["1", 2, null]] }]
        }))
        .unwrap();
        assert_eq!(env.value.len(), 1);
        assert_eq!(env.value[0].values[0].len(), 3);
    }
}
