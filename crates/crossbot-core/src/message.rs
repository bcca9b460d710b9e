//! Platform-neutral reply model.
//!
//! A [`Message`] is built by a handler and handed to one renderer per target
//! platform. Renderers copy what they need; nothing here knows about platform
//! limits or wire formats.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::handler::{AlertText, Handler};
use crate::types::FieldMap;

/// A reply produced by a handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub content: String,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Opaque color value passed through to platforms that support one.
    pub color: u32,
    pub thumbnail_url: String,
    pub footer: Footer,
    pub fields: Vec<Field>,
    /// Button grid, one inner `Vec` per row.
    pub buttons: Vec<Vec<Button>>,
}

impl Message {
    /// A message carrying only plain content.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = url.into();
        self
    }

    pub fn with_footer(mut self, text: impl Into<String>) -> Self {
        self.footer.text = text.into();
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn with_button_row(mut self, row: Vec<Button>) -> Self {
        self.buttons.push(row);
        self
    }

    /// True when any embed part (title, description, fields, footer, ...) is set.
    pub fn has_embed(&self) -> bool {
        !(self.title.is_empty()
            && self.description.is_empty()
            && self.url.is_empty()
            && self.thumbnail_url.is_empty()
            && self.footer.text.is_empty()
            && self.footer.icon_url.is_empty()
            && self.fields.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub text: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub emoji: String,
    pub callback: Callback,
}

impl Button {
    pub fn new(label: impl Into<String>, callback: Callback) -> Self {
        Self {
            label: label.into(),
            emoji: String::new(),
            callback,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }
}

/// What happens to the original message when a button is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Replace the original message with the handler's reply.
    #[default]
    EditMessage,
    /// Send the handler's reply as a new message.
    CreateMessage,
    /// Delete the original message.
    DeleteMessage,
    /// Open a pre-filled command input instead of running anything.
    Prompt,
    /// Show an ephemeral notice built by the alert capability.
    Alert,
}

/// A deferred unit of behavior resolved through the callback registry.
#[derive(Clone, Default)]
pub struct Callback {
    pub action: Action,
    /// Serialized [`FieldMap`] handed back to the handler when the button fires.
    pub payload: String,
    pub handler: Option<Arc<dyn Handler>>,
    pub prompt: Option<Prompt>,
    pub alert: Option<Arc<dyn AlertText>>,
}

impl Callback {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    /// Build an `Alert` callback.
    pub fn alert(alert: Arc<dyn AlertText>) -> Self {
        Self {
            action: Action::Alert,
            alert: Some(alert),
            ..Self::default()
        }
    }

    /// Build a `Prompt` callback.
    pub fn prompt(prompt: Prompt) -> Self {
        Self {
            action: Action::Prompt,
            prompt: Some(prompt),
            ..Self::default()
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn with_fields(mut self, fields: &FieldMap) -> Self {
        self.payload = fields.to_payload();
        self
    }

    /// Store a payload verbatim. Malformed payloads surface at run time.
    pub fn with_raw_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("action", &self.action)
            .field("payload", &self.payload)
            .field("handler", &self.handler.is_some())
            .field("prompt", &self.prompt)
            .field("alert", &self.alert.is_some())
            .finish()
    }
}

impl PartialEq for Callback {
    /// Capabilities compare by identity.
    fn eq(&self, other: &Self) -> bool {
        fn same<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }

        self.action == other.action
            && self.payload == other.payload
            && self.prompt == other.prompt
            && same(&self.handler, &other.handler)
            && same(&self.alert, &other.alert)
    }
}

/// A pre-filled follow-up command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Text placed before the flags, usually the command invocation (`/edit`).
    pub prefix: String,
    pub fields: Vec<PromptField>,
}

impl Prompt {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        self.fields.push(PromptField {
            key: key.into(),
            value: value.into(),
            placeholder: placeholder.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptField {
    pub key: String,
    pub value: String,
    /// Hint shown by platforms with native input widgets.
    pub placeholder: String,
}
