use crossbot_callbacks::CallbackRegistry;
use crossbot_channels::text::truncate;
use crossbot_channels::Renderer;
use crossbot_core::{Message, Platform};
use tracing::debug;

use crate::types::{ChatEmbed, ChatEmbedField, ChatEmbedFooter, ChatEmbedThumbnail, ChatMessage};

pub const CONTENT_LIMIT: usize = 4000;
pub const TITLE_LIMIT: usize = 256;
pub const DESCRIPTION_LIMIT: usize = 2048;
pub const FIELD_COUNT_LIMIT: usize = 25;
pub const FIELD_NAME_LIMIT: usize = 256;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const FOOTER_LIMIT: usize = 2048;

#[derive(Debug, Clone, Copy, Default)]
pub struct GuildedRenderer;

impl Renderer for GuildedRenderer {
    type Payload = ChatMessage;

    fn platform(&self) -> Platform {
        Platform::Guilded
    }

    /// Buttons are dropped and never registered.
    fn render(&self, message: &Message, _registry: &CallbackRegistry) -> ChatMessage {
        if !message.buttons.is_empty() {
            debug!(rows = message.buttons.len(), "guilded has no components, buttons dropped");
        }

        ChatMessage {
            content: truncate(&message.content, CONTENT_LIMIT),
            embeds: if message.has_embed() {
                vec![embed(message)]
            } else {
                Vec::new()
            },
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn embed(message: &Message) -> ChatEmbed {
    ChatEmbed {
        title: non_empty(&truncate(&message.title, TITLE_LIMIT)),
        description: non_empty(&truncate(&message.description, DESCRIPTION_LIMIT)),
        url: non_empty(&message.url),
        color: (message.color != 0).then_some(message.color),
        footer: (!message.footer.text.is_empty()).then(|| ChatEmbedFooter {
            text: truncate(&message.footer.text, FOOTER_LIMIT),
            icon_url: non_empty(&message.footer.icon_url),
        }),
        thumbnail: non_empty(&message.thumbnail_url).map(|url| ChatEmbedThumbnail { url }),
        fields: message
            .fields
            .iter()
            .take(FIELD_COUNT_LIMIT)
            .map(|f| ChatEmbedField {
                name: truncate(&f.name, FIELD_NAME_LIMIT),
                value: truncate(&f.value, FIELD_VALUE_LIMIT),
                inline: f.inline,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbot_core::config::RegistryConfig;
    use crossbot_core::{Action, Button, Callback};

    #[test]
    fn content_and_embed() {
        let registry = CallbackRegistry::new(&RegistryConfig::default());
        let msg = Message::text("hi")
            .with_title("T")
            .with_thumbnail("https://example.com/t.png")
            .with_field("n", "v", true);
        let out = GuildedRenderer.render(&msg, &registry);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["content"], "hi");
        assert_eq!(json["embeds"][0]["title"], "T");
        assert_eq!(json["embeds"][0]["thumbnail"]["url"], "https://example.com/t.png");
        assert_eq!(json["embeds"][0]["fields"][0]["inline"], true);
        assert!(json["embeds"][0].get("footer").is_none());
    }

    #[test]
    fn plain_text_has_no_embed() {
        let registry = CallbackRegistry::new(&RegistryConfig::default());
        let out = GuildedRenderer.render(&Message::text("plain"), &registry);
        assert!(out.embeds.is_empty());
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"content":"plain"}"#);
    }

    #[test]
    fn limits_apply_to_a_copy() {
        let registry = CallbackRegistry::new(&RegistryConfig::default());
        let long = "y".repeat(5000);
        let mut msg = Message::text(long.clone()).with_description(long.clone());
        for i in 0..40 {
            msg = msg.with_field(i.to_string(), long.clone(), false);
        }
        let before = msg.clone();
        let out = GuildedRenderer.render(&msg, &registry);

        assert_eq!(out.content.len(), CONTENT_LIMIT);
        let embed = &out.embeds[0];
        assert_eq!(embed.description.as_ref().map(String::len), Some(DESCRIPTION_LIMIT));
        assert_eq!(embed.fields.len(), FIELD_COUNT_LIMIT);
        assert_eq!(embed.fields[24].name, "24");
        assert_eq!(msg, before);
    }

    #[test]
    fn buttons_are_not_registered() {
        let registry = CallbackRegistry::new(&RegistryConfig::default());
        let msg = Message::text("x")
            .with_button_row(vec![Button::new("Go", Callback::new(Action::EditMessage))]);
        GuildedRenderer.render(&msg, &registry);
        assert!(registry.is_empty());
    }
}
