pub mod commands;
pub mod render;
pub mod types;
pub mod user;

pub use commands::bot_commands;
pub use render::{TelegramMessage, TelegramRenderer};
pub use user::{strip_bot_mention, user_display};
