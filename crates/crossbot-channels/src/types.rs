use crossbot_core::Platform;
use serde::{Deserialize, Serialize};

/// A chat message received from a platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub platform: Platform,

    /// Platform-native conversation identifier (chat ID, channel ID, …).
    pub channel_id: String,

    /// Platform-native identifier of this message, used to reply to it.
    #[serde(default)]
    pub message_id: Option<String>,

    /// Platform-native identifier for the sender.
    pub sender_id: String,

    /// Human-readable display name for the sender, if available.
    pub sender_name: Option<String>,

    /// Plain text content of the message.
    pub content: String,

    /// ISO-8601 timestamp of when the message was received.
    pub timestamp: String,

    /// Full raw payload from the platform for cases that need extra fields.
    pub raw_payload: Option<serde_json::Value>,
}

impl InboundMessage {
    /// Build a message stamped with the current time.
    pub fn new(
        platform: Platform,
        channel_id: impl Into<String>,
        sender_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            channel_id: channel_id.into(),
            message_id: None,
            sender_id: sender_id.into(),
            sender_name: None,
            content: content.into(),
            timestamp: now(),
            raw_payload: None,
        }
    }

    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    /// Identity handed to handlers as the `user` field.
    pub fn user(&self) -> &str {
        display_or_id(&self.sender_name, &self.sender_id)
    }
}

/// Where an interaction happened and how to answer it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionTarget {
    pub channel_id: String,
    /// The message the pressed button belongs to.
    pub message_id: String,
    /// Platform token used to acknowledge the press (Discord interaction
    /// token, Telegram callback query id).
    pub interaction_id: String,
}

/// A button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundInteraction {
    pub platform: Platform,
    pub target: InteractionTarget,
    pub sender_id: String,
    pub sender_name: Option<String>,
    /// Registry id carried by the pressed component.
    pub callback_id: String,
    /// ISO-8601 timestamp of when the press was received.
    pub timestamp: String,
}

impl InboundInteraction {
    pub fn new(
        platform: Platform,
        target: InteractionTarget,
        sender_id: impl Into<String>,
        callback_id: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            target,
            sender_id: sender_id.into(),
            sender_name: None,
            callback_id: callback_id.into(),
            timestamp: now(),
        }
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    pub fn user(&self) -> &str {
        display_or_id(&self.sender_name, &self.sender_id)
    }
}

fn display_or_id<'a>(name: &'a Option<String>, id: &'a str) -> &'a str {
    match name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => id,
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prefers_display_name() {
        let msg = InboundMessage::new(Platform::Telegram, "c1", "42", "/ping");
        assert_eq!(msg.user(), "42");
        assert_eq!(msg.clone().with_sender_name("alice").user(), "alice");
        assert_eq!(msg.with_sender_name("").user(), "42");
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let msg = InboundMessage::new(Platform::Discord, "c", "u", "x");
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
    }

    #[test]
    fn interaction_serializes_platform_by_name() {
        let press = InboundInteraction::new(
            Platform::Discord,
            InteractionTarget::default(),
            "u1",
            "7",
        );
        let json = serde_json::to_value(&press).unwrap();
        assert_eq!(json["platform"], "discord");
        assert_eq!(json["callback_id"], "7");
    }
}
