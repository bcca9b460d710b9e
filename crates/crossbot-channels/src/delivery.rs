use async_trait::async_trait;

use crate::{error::ChannelError, types::InteractionTarget};

/// Outbound side of a platform adapter.
///
/// The transport (HTTP client, gateway connection) lives in the
/// implementation. `&self` methods let one connected adapter serve many
/// tasks at once.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Rendered payload type, matching the adapter's [`Renderer`](crate::Renderer).
    type Payload: Send + Sync;

    /// Post a new message into a conversation, as a reply to `reply_to`
    /// where the platform supports replies.
    async fn create_message(
        &self,
        channel_id: &str,
        reply_to: Option<&str>,
        payload: &Self::Payload,
    ) -> Result<(), ChannelError>;

    /// Replace the message a pressed button belongs to.
    async fn edit_message(
        &self,
        target: &InteractionTarget,
        payload: &Self::Payload,
    ) -> Result<(), ChannelError>;

    async fn delete_message(&self, target: &InteractionTarget) -> Result<(), ChannelError>;

    /// Answer the press with an ephemeral notice. Counts as the acknowledgement.
    async fn show_alert(&self, target: &InteractionTarget, text: &str) -> Result<(), ChannelError>;

    /// Open a pre-filled command input. Counts as the acknowledgement.
    async fn open_prompt(
        &self,
        target: &InteractionTarget,
        prefill: &str,
    ) -> Result<(), ChannelError>;

    /// Tell the platform the press was handled.
    async fn acknowledge(&self, target: &InteractionTarget) -> Result<(), ChannelError>;
}
