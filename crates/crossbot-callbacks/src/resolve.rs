use crossbot_commands::encode_prompt;
use crossbot_core::{Action, Callback, FieldMap, Message, Platform, Result};
use tracing::{debug, warn};

/// What an adapter should do with the message a button was attached to.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Replace the original message.
    Edit(Message),
    /// Post a new message in the same conversation.
    Create(Message),
    /// Delete the original message. Nothing is rendered afterwards.
    Delete,
    /// Open an input pre-filled with this command text.
    Prompt(String),
    /// Show this text as an ephemeral notice.
    Alert(String),
}

/// Decode the field map stored in a callback.
pub fn parse_fields(callback: &Callback) -> Result<FieldMap> {
    FieldMap::from_payload(&callback.payload)
}

/// Run the callback's handler with its stored fields plus the caller context.
///
/// A callback without a handler yields an empty message. A payload that does
/// not decode yields a message whose content is the decode error.
pub fn run(callback: &Callback, user: &str, platform: Platform) -> Message {
    let Some(handler) = &callback.handler else {
        return Message::default();
    };

    match parse_fields(callback) {
        Ok(mut fields) => {
            fields.inject_context(user, platform);
            handler.invoke(&fields)
        }
        Err(e) => {
            warn!(error = %e, action = ?callback.action, "callback payload did not decode");
            Message::text(e.to_string())
        }
    }
}

/// Apply the callback's action.
pub fn resolve(callback: &Callback, user: &str, platform: Platform) -> Disposition {
    debug!(action = ?callback.action, user = %user, platform = %platform, "resolving callback");

    match callback.action {
        Action::EditMessage => Disposition::Edit(run(callback, user, platform)),
        Action::CreateMessage => Disposition::Create(run(callback, user, platform)),
        Action::DeleteMessage => {
            // Side effects still happen; the reply has nowhere to go.
            let _ = run(callback, user, platform);
            Disposition::Delete
        }
        Action::Prompt => {
            let prefill = callback.prompt.as_ref().map(encode_prompt).unwrap_or_default();
            Disposition::Prompt(prefill)
        }
        Action::Alert => {
            let Some(alert) = &callback.alert else {
                return Disposition::Alert(String::new());
            };
            match parse_fields(callback) {
                Ok(mut fields) => {
                    fields.inject_context(user, platform);
                    Disposition::Alert(alert.alert(&fields))
                }
                Err(e) => Disposition::Alert(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbot_core::{FnAlert, FnHandler, Prompt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn greet(fields: &FieldMap) -> Message {
        Message::text(format!(
            "{} greets {} on {}",
            fields.get("user").unwrap_or("?"),
            fields.get("name").unwrap_or("?"),
            fields.get("platform").unwrap_or("?"),
        ))
    }

    fn shout(fields: &FieldMap) -> String {
        format!("HEY {}", fields.get("user").unwrap_or("?"))
    }

    struct Counting(AtomicUsize);

    impl crossbot_core::Handler for Counting {
        fn invoke(&self, _: &FieldMap) -> Message {
            self.0.fetch_add(1, Ordering::SeqCst);
            Message::text("counted")
        }
    }

    fn fields() -> FieldMap {
        [("name", "bob"), ("user", "mallory")].into_iter().collect()
    }

    #[test]
    fn run_injects_context_over_payload() {
        let cb = Callback::new(Action::EditMessage)
            .with_handler(Arc::new(FnHandler(greet)))
            .with_fields(&fields());
        assert_eq!(
            run(&cb, "alice", Platform::Discord).content,
            "alice greets bob on discord"
        );
    }

    #[test]
    fn run_without_handler_is_empty() {
        assert_eq!(
            run(&Callback::new(Action::EditMessage), "alice", Platform::Discord),
            Message::default()
        );
    }

    #[test]
    fn malformed_payload_becomes_message_text() {
        let cb = Callback::new(Action::EditMessage)
            .with_handler(Arc::new(FnHandler(greet)))
            .with_raw_payload("{broken");
        let msg = run(&cb, "alice", Platform::Telegram);
        assert!(msg.content.starts_with("Malformed callback payload"));
        assert!(!msg.has_embed());
    }

    #[test]
    fn edit_and_create_carry_handler_output() {
        let handler = Arc::new(FnHandler(greet));
        let edit = Callback::new(Action::EditMessage)
            .with_handler(handler.clone())
            .with_fields(&fields());
        let create = Callback::new(Action::CreateMessage)
            .with_handler(handler)
            .with_fields(&fields());

        assert!(matches!(resolve(&edit, "a", Platform::Guilded), Disposition::Edit(m) if m.content == "a greets bob on guilded"));
        assert!(matches!(resolve(&create, "a", Platform::Guilded), Disposition::Create(_)));
    }

    #[test]
    fn delete_runs_handler_but_returns_nothing_to_render() {
        let counter = Arc::new(Counting(AtomicUsize::new(0)));
        let cb = Callback::new(Action::DeleteMessage).with_handler(counter.clone());
        assert_eq!(resolve(&cb, "a", Platform::Discord), Disposition::Delete);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn prompt_encodes_prefill_and_skips_handler() {
        let counter = Arc::new(Counting(AtomicUsize::new(0)));
        let cb = Callback::prompt(Prompt::new("/rename").with_field("title", "Old", "New title"))
            .with_handler(counter.clone());
        assert_eq!(
            resolve(&cb, "a", Platform::Telegram),
            Disposition::Prompt("/rename\n\n--title=\"Old\"".to_string())
        );
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn alert_uses_alert_text_not_handler() {
        let counter = Arc::new(Counting(AtomicUsize::new(0)));
        let cb = Callback::alert(Arc::new(FnAlert(shout))).with_handler(counter.clone());
        assert_eq!(
            resolve(&cb, "alice", Platform::Discord),
            Disposition::Alert("HEY alice".to_string())
        );
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn alert_with_bad_payload_reports_error() {
        let cb = Callback::alert(Arc::new(FnAlert(shout))).with_raw_payload("[1,2]");
        match resolve(&cb, "alice", Platform::Discord) {
            Disposition::Alert(text) => assert!(text.starts_with("Malformed callback payload")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
