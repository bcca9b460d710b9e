use crossbot_channels::text::truncate;
use crossbot_commands::CommandSet;

use crate::types::{BotCommand, SetMyCommands};

const COMMAND_LIMIT: usize = 32;
const DESCRIPTION_LIMIT: usize = 256;

/// `setMyCommands` payload with one entry per alias, in registration order.
///
/// Telegram wants lowercase command names and a non-empty description, so
/// commands without one fall back to their canonical name.
pub fn bot_commands(commands: &CommandSet) -> SetMyCommands {
    let commands = commands
        .iter()
        .flat_map(|command| {
            let description = if command.text.description.is_empty() {
                command.name().to_string()
            } else {
                command.text.description.clone()
            };
            command.text.aliases.iter().map(move |alias| BotCommand {
                command: truncate(&alias.to_lowercase(), COMMAND_LIMIT),
                description: truncate(&description, DESCRIPTION_LIMIT),
            })
        })
        .collect();
    SetMyCommands { commands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbot_commands::{Command, TextCommand};
    use crossbot_core::{FieldMap, FnHandler, Message};
    use std::sync::Arc;

    fn noop(_: &FieldMap) -> Message {
        Message::default()
    }

    #[test]
    fn every_alias_is_listed() {
        let set = CommandSet::new()
            .with(
                Command::new(
                    TextCommand::new(["Weather", "w"]).with_description("Current weather"),
                    Arc::new(FnHandler(noop)),
                )
                .unwrap(),
            )
            .unwrap()
            .with(Command::new(TextCommand::new(["ping"]), Arc::new(FnHandler(noop))).unwrap())
            .unwrap();

        let payload = bot_commands(&set);
        let entries: Vec<_> = payload
            .commands
            .iter()
            .map(|c| (c.command.as_str(), c.description.as_str()))
            .collect();
        assert_eq!(
            entries,
            [
                ("weather", "Current weather"),
                ("w", "Current weather"),
                ("ping", "ping")
            ]
        );
    }

    #[test]
    fn empty_set_has_no_commands() {
        assert!(bot_commands(&CommandSet::new()).commands.is_empty());
    }
}
