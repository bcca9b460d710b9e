use crate::message::Message;
use crate::types::FieldMap;

/// Business logic bound to a command or a button.
///
/// Implementations receive the final field map (parsed tokens plus the
/// injected `user`/`platform` keys) and return a platform-neutral reply.
/// They must be `Send + Sync` because every platform loop shares them.
pub trait Handler: Send + Sync {
    fn invoke(&self, fields: &FieldMap) -> Message;
}

/// Produces the text of an ephemeral alert shown when an `Alert` button is
/// pressed.
pub trait AlertText: Send + Sync {
    fn alert(&self, fields: &FieldMap) -> String;
}

/// Adapts a plain function pointer into a [`Handler`].
///
/// Only `fn` items are accepted, so the handler cannot capture state.
#[derive(Clone, Copy)]
pub struct FnHandler(pub fn(&FieldMap) -> Message);

impl Handler for FnHandler {
    fn invoke(&self, fields: &FieldMap) -> Message {
        (self.0)(fields)
    }
}

/// Adapts a plain function pointer into an [`AlertText`].
#[derive(Clone, Copy)]
pub struct FnAlert(pub fn(&FieldMap) -> String);

impl AlertText for FnAlert {
    fn alert(&self, fields: &FieldMap) -> String {
        (self.0)(fields)
    }
}
