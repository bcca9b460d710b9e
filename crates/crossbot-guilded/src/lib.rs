//! Guilded rendering. Guilded chat messages have no interactive components,
//! so only content and a single embed are produced.

pub mod render;
pub mod types;

pub use render::GuildedRenderer;
pub use types::{ChatEmbed, ChatMessage};
