//! Serde types for the Telegram Bot API.
//!
//! Only the fields crossbot reads or writes are modelled. Unknown inbound
//! fields are ignored.

use serde::{Deserialize, Serialize};

/// Inline keyboard markup for message buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// A single inline keyboard button. Exactly one of the optional fields is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    /// Inserts `@bot <value>` into the current chat's input field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query_current_chat: Option<String>,
}

/// Entry of a `setMyCommands` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetMyCommands {
    pub commands: Vec<BotCommand>,
}

/// Reply to a button press. With `show_alert` the text appears as a modal
/// notice instead of a toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub show_alert: bool,
}

impl AnswerCallbackQuery {
    /// Silent acknowledgement.
    pub fn ack(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: false,
        }
    }

    pub fn alert(callback_query_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: Some(text.into()),
            show_alert: true,
        }
    }
}

/// A Telegram User.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_button_omits_inline_query() {
        let button = InlineKeyboardButton {
            text: "Go".into(),
            callback_data: Some("3".into()),
            switch_inline_query_current_chat: None,
        };
        assert_eq!(
            serde_json::to_string(&button).unwrap(),
            r#"{"text":"Go","callback_data":"3"}"#
        );
    }

    #[test]
    fn answer_callback_forms() {
        let ack = serde_json::to_value(AnswerCallbackQuery::ack("q1")).unwrap();
        assert!(ack.get("text").is_none());
        assert_eq!(ack["show_alert"], false);

        let alert = serde_json::to_value(AnswerCallbackQuery::alert("q1", "careful")).unwrap();
        assert_eq!(alert["text"], "careful");
        assert_eq!(alert["show_alert"], true);
    }

    #[test]
    fn user_deserializes_without_optional_names() {
        let user: User =
            serde_json::from_str(r#"{"id": 7, "first_name": "Alice", "is_bot": false}"#).unwrap();
        assert_eq!(user.first_name, "Alice");
        assert!(user.username.is_none());
        assert!(user.last_name.is_none());
    }
}
