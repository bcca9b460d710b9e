//! Commands the console ships with.

use std::sync::Arc;

use crossbot_commands::{Command, CommandSet, TextCommand};
use crossbot_core::{
    Action, AlertText, Button, Callback, FieldMap, Handler, Message, Prompt, Result, USER_KEY,
};

pub fn commands() -> Result<CommandSet> {
    CommandSet::new()
        .with(Command::new(
            TextCommand::new(["greet", "hello"])
                .with_description("Say hello")
                .with_argument("name")
                .with_option("loud"),
            Arc::new(Greet),
        )?)?
        .with(Command::new(
            TextCommand::new(["counter"])
                .with_description("A counter you can click")
                .with_option("start"),
            Arc::new(Counter),
        )?)?
        .with(Command::new(
            TextCommand::new(["echo"])
                .with_description("Repeat text exactly as typed")
                .with_delimiter(""),
            Arc::new(Echo),
        )?)?
        .with(Command::new(
            TextCommand::new(["note"])
                .with_description("Show a note card")
                .with_argument("title")
                .with_option("body"),
            Arc::new(Note),
        )?)
}

fn user(fields: &FieldMap) -> &str {
    fields.get(USER_KEY).unwrap_or("someone")
}

struct Greet;

impl Handler for Greet {
    fn invoke(&self, fields: &FieldMap) -> Message {
        let text = format!("Hello, {}!", fields.get("name").unwrap_or("stranger"));
        if fields.contains("loud") {
            Message::text(text.to_uppercase())
        } else {
            Message::text(text)
        }
    }
}

struct Counter;

impl Counter {
    fn step(value: i64, action: Action) -> Callback {
        let fields: FieldMap = [("start", value.to_string())].into_iter().collect();
        Callback::new(action)
            .with_handler(Arc::new(Counter))
            .with_fields(&fields)
    }
}

impl Handler for Counter {
    fn invoke(&self, fields: &FieldMap) -> Message {
        let value: i64 = fields
            .get("start")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);

        Message::default()
            .with_title("Counter")
            .with_description(format!("Value: {}", value))
            .with_color(0x5865f2)
            .with_footer(format!("last touched by {}", user(fields)))
            .with_button_row(vec![
                Button::new("+1", Counter::step(value.saturating_add(1), Action::EditMessage)),
                Button::new("-1", Counter::step(value.saturating_sub(1), Action::EditMessage)),
                Button::new("Reset", Counter::step(0, Action::EditMessage)).with_emoji("🔄"),
            ])
            .with_button_row(vec![
                Button::new("Copy", Counter::step(value, Action::CreateMessage)),
                Button::new("Close", Callback::new(Action::DeleteMessage)).with_emoji("✖"),
            ])
    }
}

struct Echo;

impl Handler for Echo {
    fn invoke(&self, fields: &FieldMap) -> Message {
        Message::text(fields.get("").unwrap_or_default())
    }
}

struct Note;

impl Handler for Note {
    fn invoke(&self, fields: &FieldMap) -> Message {
        let title = fields.get("title").unwrap_or_default();
        let body = fields.get("body").unwrap_or_default();
        let context: FieldMap = [("title", title)].into_iter().collect();

        let edit = Prompt::new(format!("/note {}", quote(title))).with_field("body", body, "Note text");

        Message::default()
            .with_title(title)
            .with_description(body)
            .with_field("Author", user(fields), true)
            .with_button_row(vec![
                Button::new("Edit", Callback::prompt(edit)).with_emoji("✏"),
                Button::new("Info", Callback::alert(Arc::new(NoteInfo)).with_fields(&context)),
            ])
    }
}

struct NoteInfo;

impl AlertText for NoteInfo {
    fn alert(&self, fields: &FieldMap) -> String {
        format!(
            "\"{}\" viewed by {} on {}",
            fields.get("title").unwrap_or_default(),
            user(fields),
            fields.get("platform").unwrap_or_default()
        )
    }
}

/// Quote a value so it survives tokenizing as one positional argument.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbot_callbacks::{resolve, CallbackRegistry, Disposition};
    use crossbot_commands::{Dispatch, Dispatcher};
    use crossbot_core::config::RegistryConfig;
    use crossbot_core::Platform;

    fn reply(dispatcher: &Dispatcher, text: &str) -> Message {
        match dispatcher.dispatch_text("ann", text, Platform::Discord) {
            Some(Dispatch::Reply(message)) => message,
            other => panic!("unexpected dispatch {other:?}"),
        }
    }

    #[test]
    fn demo_commands_register() {
        let set = commands().unwrap();
        assert_eq!(set.len(), 4);
        assert!(set.find("hello").is_some());
    }

    #[test]
    fn greet_honors_loud_flag() {
        let dispatcher = Dispatcher::new(commands().unwrap());
        assert_eq!(reply(&dispatcher, "/greet Bob").content, "Hello, Bob!");
        assert_eq!(reply(&dispatcher, "/hello Bob \u{2014}loud").content, "HELLO, BOB!");
    }

    #[test]
    fn counter_buttons_step_the_value() {
        let dispatcher = Dispatcher::new(commands().unwrap());
        let registry = CallbackRegistry::new(&RegistryConfig::default());
        let first = reply(&dispatcher, "/counter --start=41");
        assert_eq!(first.description, "Value: 41");

        let plus = registry.register(first.buttons[0][0].callback.clone());
        let callback = registry.lookup(&plus).unwrap();
        match resolve(&callback, "ben", Platform::Telegram) {
            Disposition::Edit(next) => {
                assert_eq!(next.description, "Value: 42");
                assert_eq!(next.footer.text, "last touched by ben");
            }
            other => panic!("unexpected {other:?}"),
        }

        let close = first.buttons[1][1].callback.clone();
        assert_eq!(resolve(&close, "ben", Platform::Telegram), Disposition::Delete);
    }

    #[test]
    fn note_edit_prompt_round_trips() {
        let dispatcher = Dispatcher::new(commands().unwrap());
        let card = reply(&dispatcher, "/note \"Shopping \\\"list\\\"\" --body=\"eggs\nmilk\"");
        assert_eq!(card.title, "Shopping \"list\"");
        assert_eq!(card.description, "eggs\nmilk");

        let Disposition::Prompt(prefill) = resolve(&card.buttons[0][0].callback, "ann", Platform::Discord)
        else {
            panic!("expected a prompt");
        };
        let again = reply(&dispatcher, &prefill);
        assert_eq!(again.title, card.title);
        assert_eq!(again.description, card.description);
    }

    #[test]
    fn note_info_alert_names_viewer() {
        let dispatcher = Dispatcher::new(commands().unwrap());
        let card = reply(&dispatcher, "/note Plans");
        assert_eq!(
            resolve(&card.buttons[0][1].callback, "cy", Platform::Guilded),
            Disposition::Alert("\"Plans\" viewed by cy on guilded".into())
        );
    }

    #[test]
    fn echo_keeps_raw_text() {
        let dispatcher = Dispatcher::new(commands().unwrap());
        assert_eq!(reply(&dispatcher, "/echo  a  \"b").content, "a  \"b");
    }
}
