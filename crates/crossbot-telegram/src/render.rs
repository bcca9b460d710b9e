use crossbot_callbacks::CallbackRegistry;
use crossbot_channels::text::{labeled, truncate};
use crossbot_channels::Renderer;
use crossbot_commands::encode_prompt;
use crossbot_core::{Action, Button, Message, Platform};
use serde::Serialize;
use tracing::debug;

use crate::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Maximum characters per Telegram message.
pub const TEXT_LIMIT: usize = 4096;
/// Maximum length of an inline query pre-fill.
pub const INLINE_QUERY_LIMIT: usize = 256;

/// `sendMessage` / `editMessageText` body without the chat addressing, which
/// the adapter fills in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelegramMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Renders messages as plain text plus an inline keyboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramRenderer;

impl Renderer for TelegramRenderer {
    type Payload = TelegramMessage;

    fn platform(&self) -> Platform {
        Platform::Telegram
    }

    fn render(&self, message: &Message, registry: &CallbackRegistry) -> TelegramMessage {
        let keyboard: Vec<Vec<InlineKeyboardButton>> = message
            .buttons
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.iter().map(|b| button(b, registry)).collect())
            .collect();

        TelegramMessage {
            text: truncate(&text(message), TEXT_LIMIT),
            reply_markup: (!keyboard.is_empty()).then_some(InlineKeyboardMarkup {
                inline_keyboard: keyboard,
            }),
        }
    }
}

/// Flatten the message into text: content, title (linked when a URL is
/// set), description, bold field names over their values, footer.
pub fn text(message: &Message) -> String {
    let mut out = String::new();

    if !message.content.is_empty() {
        out.push_str(&message.content);
        out.push_str("\n\n");
    }

    if !message.url.is_empty() {
        out.push_str(&format!("[{}]({})\n", message.title, message.url));
    } else if !message.title.is_empty() {
        out.push_str(&message.title);
        out.push('\n');
    }

    if !message.description.is_empty() {
        out.push_str(&message.description);
        out.push_str("\n\n");
    }

    for field in &message.fields {
        out.push_str(&format!("**{}**\n{}\n\n", field.name, field.value));
    }

    out.push_str(&message.footer.text);

    out.trim().to_string()
}

/// Prompt buttons open the inline query directly and carry no callback id,
/// so only the other actions are registered.
fn button(button: &Button, registry: &CallbackRegistry) -> InlineKeyboardButton {
    let text = labeled(&button.emoji, &button.label);

    if button.callback.action != Action::Prompt {
        return InlineKeyboardButton {
            text,
            callback_data: Some(registry.register(button.callback.clone())),
            switch_inline_query_current_chat: None,
        };
    }

    let prefill = button
        .callback
        .prompt
        .as_ref()
        .map(encode_prompt)
        .unwrap_or_default();
    if prefill.chars().count() > INLINE_QUERY_LIMIT {
        debug!(len = prefill.len(), "prompt pre-fill truncated for inline query");
    }
    InlineKeyboardButton {
        text,
        callback_data: None,
        switch_inline_query_current_chat: Some(truncate(&prefill, INLINE_QUERY_LIMIT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbot_core::config::RegistryConfig;
    use crossbot_core::{Callback, Prompt};
    use std::sync::Arc;

    fn registry() -> Arc<CallbackRegistry> {
        CallbackRegistry::new(&RegistryConfig::default())
    }

    #[test]
    fn text_layout_follows_message_order() {
        let msg = Message::text("Hello")
            .with_title("Weather")
            .with_description("Sunny")
            .with_field("High", "21°C", true)
            .with_field("Low", "12°C", true)
            .with_footer("via crossbot");
        assert_eq!(
            text(&msg),
            "Hello\n\nWeather\nSunny\n\n**High**\n21°C\n\n**Low**\n12°C\n\nvia crossbot"
        );
    }

    #[test]
    fn title_links_to_url() {
        let msg = Message::default()
            .with_title("Docs")
            .with_url("https://example.com");
        assert_eq!(text(&msg), "[Docs](https://example.com)");
    }

    #[test]
    fn empty_message_renders_empty_text() {
        let out = TelegramRenderer.render(&Message::default(), &registry());
        assert_eq!(out.text, "");
        assert!(out.reply_markup.is_none());
    }

    #[test]
    fn text_is_capped_without_touching_message() {
        let msg = Message::text("é".repeat(5000));
        let before = msg.clone();
        let out = TelegramRenderer.render(&msg, &registry());
        assert_eq!(out.text.chars().count(), TEXT_LIMIT);
        assert_eq!(msg, before);
    }

    #[test]
    fn callback_buttons_carry_registered_ids() {
        let registry = registry();
        let msg = Message::text("menu").with_button_row(vec![
            Button::new("Next", Callback::new(Action::EditMessage)).with_emoji("➡"),
            Button::new("Close", Callback::new(Action::DeleteMessage)),
        ]);
        let out = TelegramRenderer.render(&msg, &registry);
        let row = &out.reply_markup.unwrap().inline_keyboard[0];
        assert_eq!(row[0].text, "➡ Next");
        assert_eq!(row[1].text, "Close");
        let id = row[1].callback_data.as_deref().unwrap();
        assert_eq!(registry.lookup(id).unwrap().action, Action::DeleteMessage);
    }

    #[test]
    fn only_buttons_with_callback_data_are_registered() {
        let registry = registry();
        let msg = Message::text("x").with_button_row(vec![
            Button::new("Rename", Callback::prompt(Prompt::new("/rename"))),
            Button::new("Close", Callback::new(Action::DeleteMessage)),
        ]);
        for _ in 0..3 {
            TelegramRenderer.render(&msg, &registry);
        }
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn prompt_buttons_prefill_the_input() {
        let registry = registry();
        let prompt = Prompt::new("/rename").with_field("title", "Old name", "");
        let msg = Message::text("x")
            .with_button_row(vec![Button::new("Rename", Callback::prompt(prompt))]);
        let out = TelegramRenderer.render(&msg, &registry);
        let button = &out.reply_markup.unwrap().inline_keyboard[0][0];
        assert!(button.callback_data.is_none());
        assert_eq!(
            button.switch_inline_query_current_chat.as_deref(),
            Some("/rename\n\n--title=\"Old name\"")
        );
        assert!(registry.is_empty());
    }
}
