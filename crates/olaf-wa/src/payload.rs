//! Inbound webhook payload types and extraction.
//!
//! The Graph API wraps every delivery in an entry/changes/value envelope
//! that may or may not contain a user message (status updates arrive on
//! the same route). Extraction takes the first message of the first
//! change — the transport delivers one user message per POST in practice.

use serde::Deserialize;

use olaf_core::{InboundMessage, MessageContent};

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,
    pub from: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: Option<TextBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextBody {
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub phone_number_id: Option<String>,
}

/// Pull the first user message out of a webhook delivery.
///
/// `None` means the delivery carried no message (e.g. a status update)
/// and the caller should acknowledge and ignore it.
pub fn extract_inbound(payload: &WebhookPayload) -> Option<InboundMessage> {
    let value = &payload.entry.first()?.changes.first()?.value;
    let message = value.messages.first()?;

    let display_name = value
        .contacts
        .first()
        .and_then(|c| c.profile.as_ref())
        .and_then(|p| p.name.clone());

    let content = match (&message.text, message.kind.as_deref()) {
        (Some(text), _) => MessageContent::Text(text.body.clone()),
        (None, Some("audio")) => MessageContent::Audio,
        (None, kind) => MessageContent::Other(kind.unwrap_or("unknown").to_string()),
    };

    Some(InboundMessage {
        message_id: message.id.clone(),
        sender: message.from.clone(),
        display_name,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(payload: serde_json::Value) -> WebhookPayload {
        serde_json::from_value(payload).unwrap()
    }

    fn text_delivery() -> serde_json::Value {
        serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "123",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": { "display_phone_number": "3859", "phone_number_id": "555" },
                        "contacts": [{ "profile": { "name": "Ana" }, "wa_id": "385911234567" }],
                        "messages": [{
                            "id": "wamid.abc",
                            "from": "385911234567",
                            "timestamp": "1722470400",
                            "type": "text",
                            "text": { "body": "2 mlijeka u hladnjak" }
                        }]
                    }
                }]
            }]
        })
    }

    #[test]
    fn test_extract_text_message() {
        let msg = extract_inbound(&parse(text_delivery())).expect("message expected");
        assert_eq!(msg.message_id, "wamid.abc");
        assert_eq!(msg.sender, "385911234567");
        assert_eq!(msg.display_name.as_deref(), Some("Ana"));
        assert_eq!(
            msg.content,
            MessageContent::Text("2 mlijeka u hladnjak".to_string())
        );
    }

    #[test]
    fn test_extract_audio_message() {
        let mut payload = text_delivery();
        let message = &mut payload["entry"][0]["changes"][0]["value"]["messages"][0];
        message["type"] = "audio".into();
        message.as_object_mut().unwrap().remove("text");

        let msg = extract_inbound(&parse(payload)).expect("message expected");
        assert_eq!(msg.content, MessageContent::Audio);
    }

    #[test]
    fn test_extract_other_content() {
        let mut payload = text_delivery();
        let message = &mut payload["entry"][0]["changes"][0]["value"]["messages"][0];
        message["type"] = "image".into();
        message.as_object_mut().unwrap().remove("text");

        let msg = extract_inbound(&parse(payload)).expect("message expected");
        assert_eq!(msg.content, MessageContent::Other("image".to_string()));
    }

    #[test]
    fn test_status_delivery_has_no_message() {
        let payload = parse(serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "123",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "statuses": [{ "id": "wamid.abc", "status": "delivered" }]
                    }
                }]
            }]
        }));
        assert!(extract_inbound(&payload).is_none());
    }

    #[test]
    fn test_empty_payload() {
        assert!(extract_inbound(&parse(serde_json::json!({ "entry": [] }))).is_none());
        assert!(extract_inbound(&parse(serde_json::json!({}))).is_none());
    }

    #[test]
    fn test_missing_profile_name_is_tolerated() {
        let mut payload = text_delivery();
        payload["entry"][0]["changes"][0]["value"]
            .as_object_mut()
            .unwrap()
            .remove("contacts");

        let msg = extract_inbound(&parse(payload)).expect("message expected");
        assert!(msg.display_name.is_none());
    }
}
