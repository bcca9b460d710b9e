//! Serde types for the Discord interaction and application-command APIs.
//!
//! Outbound types only serialize the fields this crate fills in; empty
//! optional parts are left out of the JSON entirely.

use serde::{Deserialize, Serialize};

pub const RESPONSE_CHANNEL_MESSAGE: u8 = 4;
pub const RESPONSE_DEFERRED_UPDATE: u8 = 6;
pub const RESPONSE_UPDATE_MESSAGE: u8 = 7;
pub const RESPONSE_MODAL: u8 = 9;

pub const COMPONENT_ACTION_ROW: u8 = 1;
pub const COMPONENT_BUTTON: u8 = 2;
pub const COMPONENT_TEXT_INPUT: u8 = 4;

pub const BUTTON_STYLE_PRIMARY: u8 = 1;
pub const TEXT_INPUT_PARAGRAPH: u8 = 2;

pub const COMMAND_CHAT_INPUT: u8 = 1;
pub const OPTION_STRING: u8 = 3;

/// Message flag that hides a response from everyone but the invoking user.
pub const FLAG_EPHEMERAL: u64 = 1 << 6;

/// Body of an interaction response or message create/edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InteractionResponseData {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> Self {
        Self {
            kind: COMPONENT_ACTION_ROW,
            components,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Button(Button),
    TextInput(TextInput),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: u8,
    pub style: u8,
    pub label: String,
    pub custom_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emoji {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextInput {
    #[serde(rename = "type")]
    pub kind: u8,
    pub custom_id: String,
    pub style: u8,
    pub label: String,
    pub value: String,
    pub required: bool,
}

/// A pop-up form shown in response to a component press.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modal {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<ActionRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Message(InteractionResponseData),
    Modal(Modal),
}

/// Full interaction callback: a type code plus its body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseBody>,
}

impl InteractionResponse {
    /// Reply to a slash command with a new message.
    pub fn message(data: InteractionResponseData) -> Self {
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: Some(ResponseBody::Message(data)),
        }
    }

    /// Replace the message the pressed component belongs to.
    pub fn update(data: InteractionResponseData) -> Self {
        Self {
            kind: RESPONSE_UPDATE_MESSAGE,
            data: Some(ResponseBody::Message(data)),
        }
    }

    /// Acknowledge a component press without changing anything yet.
    pub fn deferred_update() -> Self {
        Self {
            kind: RESPONSE_DEFERRED_UPDATE,
            data: None,
        }
    }

    /// Text only the presser can see.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self::message(InteractionResponseData {
            content: content.into(),
            flags: Some(FLAG_EPHEMERAL),
            ..InteractionResponseData::default()
        })
    }

    pub fn modal(modal: Modal) -> Self {
        Self {
            kind: RESPONSE_MODAL,
            data: Some(ResponseBody::Modal(modal)),
        }
    }
}

/// Registration payload for one slash command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationCommand {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

/// An option value received with an application-command interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    /// Present on sub-command options.
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}
