pub mod delivery;
pub mod error;
pub mod render;
pub mod router;
pub mod text;
pub mod types;

pub use delivery::Delivery;
pub use error::ChannelError;
pub use render::Renderer;
pub use router::{handle_interaction, handle_text, Outcome, Router};
pub use types::{InboundInteraction, InboundMessage, InteractionTarget};
