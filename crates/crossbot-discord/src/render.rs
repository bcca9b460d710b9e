use crossbot_callbacks::CallbackRegistry;
use crossbot_channels::text::truncate;
use crossbot_channels::Renderer;
use crossbot_core::{Message, Platform};
use tracing::debug;

use crate::types::{
    ActionRow, Button, Component, Embed, EmbedField, EmbedFooter, EmbedThumbnail, Emoji,
    InteractionResponse, InteractionResponseData, Modal, TextInput, BUTTON_STYLE_PRIMARY,
    COMPONENT_BUTTON, COMPONENT_TEXT_INPUT, TEXT_INPUT_PARAGRAPH,
};

pub const CONTENT_LIMIT: usize = 2000;
pub const TITLE_LIMIT: usize = 256;
pub const DESCRIPTION_LIMIT: usize = 4096;
pub const FIELD_COUNT_LIMIT: usize = 25;
pub const FIELD_NAME_LIMIT: usize = 256;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const FOOTER_LIMIT: usize = 2048;
pub const ROW_LIMIT: usize = 5;
pub const BUTTONS_PER_ROW: usize = 5;
pub const LABEL_LIMIT: usize = 80;

const MODAL_TITLE_LIMIT: usize = 45;
const TEXT_INPUT_LIMIT: usize = 4000;
/// `custom_id` of the single text input inside a prompt modal.
pub const PROMPT_INPUT_ID: &str = "prompt";

/// Renders messages as Discord interaction response data: content, at most one
/// embed, and up to five rows of primary buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscordRenderer;

impl Renderer for DiscordRenderer {
    type Payload = InteractionResponseData;

    fn platform(&self) -> Platform {
        Platform::Discord
    }

    fn render(&self, message: &Message, registry: &CallbackRegistry) -> InteractionResponseData {
        let embeds = if message.has_embed() {
            vec![embed(message)]
        } else {
            Vec::new()
        };

        InteractionResponseData {
            content: truncate(&message.content, CONTENT_LIMIT),
            embeds,
            components: components(message, registry),
            flags: None,
        }
    }
}

fn non_empty(s: &str, limit: usize) -> Option<String> {
    (!s.is_empty()).then(|| truncate(s, limit))
}

fn embed(message: &Message) -> Embed {
    if message.fields.len() > FIELD_COUNT_LIMIT {
        debug!(fields = message.fields.len(), "dropping embed fields over the limit");
    }

    Embed {
        title: non_empty(&message.title, TITLE_LIMIT),
        description: non_empty(&message.description, DESCRIPTION_LIMIT),
        url: non_empty(&message.url, usize::MAX),
        color: (message.color != 0).then_some(message.color),
        fields: message
            .fields
            .iter()
            .take(FIELD_COUNT_LIMIT)
            .map(|f| EmbedField {
                name: truncate(&f.name, FIELD_NAME_LIMIT),
                value: truncate(&f.value, FIELD_VALUE_LIMIT),
                inline: f.inline,
            })
            .collect(),
        footer: (!message.footer.text.is_empty()).then(|| EmbedFooter {
            text: truncate(&message.footer.text, FOOTER_LIMIT),
            icon_url: non_empty(&message.footer.icon_url, usize::MAX),
        }),
        thumbnail: (!message.thumbnail_url.is_empty()).then(|| EmbedThumbnail {
            url: message.thumbnail_url.clone(),
        }),
    }
}

/// Only buttons that fit within the row and per-row limits are registered.
fn components(message: &Message, registry: &CallbackRegistry) -> Vec<ActionRow> {
    message
        .buttons
        .iter()
        .filter(|row| !row.is_empty())
        .take(ROW_LIMIT)
        .map(|row| {
            ActionRow::new(
                row.iter()
                    .take(BUTTONS_PER_ROW)
                    .map(|b| {
                        Component::Button(Button {
                            kind: COMPONENT_BUTTON,
                            style: BUTTON_STYLE_PRIMARY,
                            label: truncate(&b.label, LABEL_LIMIT),
                            custom_id: registry.register(b.callback.clone()),
                            emoji: (!b.emoji.is_empty()).then(|| Emoji {
                                name: b.emoji.clone(),
                            }),
                        })
                    })
                    .collect(),
            )
        })
        .collect()
}

/// Modal answering a pressed prompt button: one paragraph input pre-filled
/// with the command text. Submitting it should be dispatched like a typed
/// message.
pub fn prompt_modal(callback_id: &str, title: &str, prefill: &str) -> InteractionResponse {
    let title = if title.is_empty() { "Edit command" } else { title };
    InteractionResponse::modal(Modal {
        custom_id: callback_id.to_string(),
        title: truncate(title, MODAL_TITLE_LIMIT),
        components: vec![ActionRow::new(vec![Component::TextInput(TextInput {
            kind: COMPONENT_TEXT_INPUT,
            custom_id: PROMPT_INPUT_ID.to_string(),
            style: TEXT_INPUT_PARAGRAPH,
            label: "Command".to_string(),
            value: truncate(prefill, TEXT_INPUT_LIMIT),
            required: true,
        })])],
    })
}
