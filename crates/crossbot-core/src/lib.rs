pub mod config;
pub mod error;
pub mod handler;
pub mod message;
pub mod types;

pub use config::CrossbotConfig;
pub use error::{CrossbotError, Result};
pub use handler::{AlertText, FnAlert, FnHandler, Handler};
pub use message::{Action, Button, Callback, Field, Footer, Message, Prompt, PromptField};
pub use types::{FieldMap, Platform, PLATFORM_KEY, USER_KEY};
