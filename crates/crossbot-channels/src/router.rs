//! Inbound routing: text → dispatcher → renderer → delivery, and
//! button press → registry → action → renderer → delivery.

use std::sync::Arc;

use crossbot_callbacks::{resolve, CallbackRegistry, Disposition};
use crossbot_commands::Dispatcher;
use tracing::{debug, info};

use crate::{
    delivery::Delivery,
    error::ChannelError,
    render::Renderer,
    types::{InboundInteraction, InboundMessage},
};

/// What routing did with an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a command for this bot.
    Ignored,
    /// A reply (or usage text) was posted.
    Replied,
    Edited,
    Created,
    Deleted,
    Prompted,
    Alerted,
    /// The pressed button's callback is unknown or expired. Nothing was sent.
    Missed,
}

/// Handle a chat message. Commands are answered with a new message in the
/// same conversation, replying to the command when its id is known.
pub async fn handle_text<R, D>(
    dispatcher: &Dispatcher,
    registry: &CallbackRegistry,
    renderer: &R,
    delivery: &D,
    inbound: &InboundMessage,
) -> Result<Outcome, ChannelError>
where
    R: Renderer,
    D: Delivery<Payload = R::Payload>,
{
    let Some(dispatch) = dispatcher.dispatch_text(inbound.user(), &inbound.content, inbound.platform)
    else {
        return Ok(Outcome::Ignored);
    };

    let payload = renderer.render(&dispatch.into_message(), registry);
    delivery
        .create_message(&inbound.channel_id, inbound.message_id.as_deref(), &payload)
        .await?;
    info!(platform = %inbound.platform, channel = %inbound.channel_id, "command reply sent");
    Ok(Outcome::Replied)
}

/// Handle a button press.
///
/// Only `Edit` and `Create` dispositions are rendered. A delete is never
/// followed by a render or any further message delivery.
pub async fn handle_interaction<R, D>(
    registry: &CallbackRegistry,
    renderer: &R,
    delivery: &D,
    press: &InboundInteraction,
) -> Result<Outcome, ChannelError>
where
    R: Renderer,
    D: Delivery<Payload = R::Payload>,
{
    let Some(callback) = registry.lookup(&press.callback_id) else {
        debug!(id = %press.callback_id, platform = %press.platform, "callback not found");
        return Ok(Outcome::Missed);
    };

    let target = &press.target;
    let outcome = match resolve(&callback, press.user(), press.platform) {
        Disposition::Edit(message) => {
            let payload = renderer.render(&message, registry);
            delivery.edit_message(target, &payload).await?;
            delivery.acknowledge(target).await?;
            Outcome::Edited
        }
        Disposition::Create(message) => {
            let payload = renderer.render(&message, registry);
            let reply_to = Some(target.message_id.as_str()).filter(|id| !id.is_empty());
            delivery
                .create_message(&target.channel_id, reply_to, &payload)
                .await?;
            delivery.acknowledge(target).await?;
            Outcome::Created
        }
        Disposition::Delete => {
            delivery.delete_message(target).await?;
            delivery.acknowledge(target).await?;
            Outcome::Deleted
        }
        Disposition::Prompt(prefill) => {
            delivery.open_prompt(target, &prefill).await?;
            Outcome::Prompted
        }
        Disposition::Alert(text) => {
            delivery.show_alert(target, &text).await?;
            Outcome::Alerted
        }
    };

    info!(id = %press.callback_id, platform = %press.platform, outcome = ?outcome, "interaction handled");
    Ok(outcome)
}

/// One platform's routing context: the shared dispatcher and registry plus
/// that platform's renderer and delivery.
pub struct Router<R, D> {
    dispatcher: Arc<Dispatcher>,
    registry: Arc<CallbackRegistry>,
    renderer: R,
    delivery: D,
}

impl<R, D> Router<R, D>
where
    R: Renderer,
    D: Delivery<Payload = R::Payload>,
{
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        registry: Arc<CallbackRegistry>,
        renderer: R,
        delivery: D,
    ) -> Self {
        Self {
            dispatcher,
            registry,
            renderer,
            delivery,
        }
    }

    pub async fn on_message(&self, inbound: &InboundMessage) -> Result<Outcome, ChannelError> {
        handle_text(
            &self.dispatcher,
            &self.registry,
            &self.renderer,
            &self.delivery,
            inbound,
        )
        .await
    }

    pub async fn on_interaction(&self, press: &InboundInteraction) -> Result<Outcome, ChannelError> {
        handle_interaction(&self.registry, &self.renderer, &self.delivery, press).await
    }

    pub fn registry(&self) -> &Arc<CallbackRegistry> {
        &self.registry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }
}
