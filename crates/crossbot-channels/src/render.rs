use crossbot_callbacks::CallbackRegistry;
use crossbot_core::{Message, Platform};

/// Turns a platform-neutral [`Message`] into one platform's payload.
///
/// Rendering never mutates the message: limits are applied to a private
/// copy. The only side effect allowed is registering the callbacks of the
/// buttons that end up in the payload, whose ids become the components'
/// activation tokens.
pub trait Renderer: Send + Sync {
    type Payload: Send + Sync;

    fn platform(&self) -> Platform;

    fn render(&self, message: &Message, registry: &CallbackRegistry) -> Self::Payload;
}
