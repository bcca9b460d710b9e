//! Slash-command registration payloads and option mapping.
//!
//! Every alias is registered as its own chat-input command. Positional
//! arguments become required string options, flags become optional ones.
//! Commands that take raw text get a single optional `text` option.

use crossbot_channels::text::truncate;
use crossbot_commands::{CommandSet, TextCommand};
use crossbot_core::FieldMap;
use serde_json::Value;
use tracing::debug;

use crate::types::{ApplicationCommand, CommandOption, InteractionOption, COMMAND_CHAT_INPUT, OPTION_STRING};

const NAME_LIMIT: usize = 32;
const DESCRIPTION_LIMIT: usize = 100;

/// Option name standing in for the `""` raw-text field.
pub const RAW_TEXT_OPTION: &str = "text";

/// Build the bulk-overwrite payload for every command in the set.
pub fn application_commands(commands: &CommandSet) -> Vec<ApplicationCommand> {
    commands
        .iter()
        .flat_map(|command| {
            command
                .text
                .aliases
                .iter()
                .map(move |alias| application_command(alias, &command.text))
        })
        .collect()
}

fn application_command(alias: &str, text: &TextCommand) -> ApplicationCommand {
    let description = if text.description.is_empty() {
        text.name()
    } else {
        text.description.as_str()
    };

    let mut options: Vec<CommandOption> = text
        .arguments
        .iter()
        .map(|name| string_option(name, true))
        .chain(text.options.iter().map(|name| string_option(name, false)))
        .collect();
    if text.delimiter().is_empty() {
        options.push(string_option(RAW_TEXT_OPTION, false));
    }

    ApplicationCommand {
        kind: COMMAND_CHAT_INPUT,
        name: truncate(&alias.to_lowercase(), NAME_LIMIT),
        description: truncate(description, DESCRIPTION_LIMIT),
        options,
    }
}

/// Name Discord knows a declared argument or option by.
fn option_name(name: &str) -> String {
    truncate(&name.to_lowercase(), NAME_LIMIT)
}

fn string_option(name: &str, required: bool) -> CommandOption {
    CommandOption {
        kind: OPTION_STRING,
        name: option_name(name),
        description: truncate(name, DESCRIPTION_LIMIT),
        required,
    }
}

/// Turn interaction options into the field map a handler expects.
///
/// Option names are mapped back to the declared argument or option they were
/// registered from, so `userId` is found again when Discord sends `userid`.
/// Options that match no declared name are dropped. Sub-command options are
/// flattened. Non-string values keep their JSON text (`3`, `true`). The
/// raw-text option maps back to the `""` key.
pub fn fields_from_options(command: &TextCommand, options: &[InteractionOption]) -> FieldMap {
    let mut fields = FieldMap::new();
    collect(command, options, &mut fields);
    fields
}

fn collect(command: &TextCommand, options: &[InteractionOption], fields: &mut FieldMap) {
    for option in options {
        if !option.options.is_empty() {
            collect(command, &option.options, fields);
            continue;
        }
        let Some(value) = &option.value else {
            continue;
        };
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        if command.delimiter().is_empty() && option.name == RAW_TEXT_OPTION {
            fields.insert("", value);
            continue;
        }
        match declared_name(command, &option.name) {
            Some(name) => {
                fields.insert(name, value);
            }
            None => debug!(option = %option.name, command = %command.name(), "dropping undeclared option"),
        }
    }
}

fn declared_name<'a>(command: &'a TextCommand, received: &str) -> Option<&'a str> {
    command
        .arguments
        .iter()
        .chain(command.options.iter())
        .find(|declared| option_name(declared).eq_ignore_ascii_case(received))
        .map(String::as_str)
}
