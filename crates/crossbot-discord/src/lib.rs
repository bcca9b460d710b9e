//! Discord rendering: embeds, button rows, prompt modals and
//! application-command registration payloads.

pub mod commands;
pub mod render;
pub mod types;

pub use commands::{application_commands, fields_from_options};
pub use render::{prompt_modal, DiscordRenderer};
pub use types::{InteractionResponse, InteractionResponseData};
