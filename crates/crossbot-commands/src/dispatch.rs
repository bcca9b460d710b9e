//! Command execution: parse, check required arguments, inject context, invoke.

use crossbot_core::{FieldMap, Message, Platform};
use tracing::{debug, info};

use crate::descriptor::{Command, CommandSet, TextCommand};
use crate::tokenizer::{invocation_word, parse_arguments, strip_invocation};

/// Outcome of running a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The handler ran and produced this reply.
    Reply(Message),
    /// A required argument was missing; the handler was not called.
    Usage(String),
}

impl Dispatch {
    /// Collapse into something a renderer can send. Usage text becomes plain content.
    pub fn into_message(self) -> Message {
        match self {
            Dispatch::Reply(message) => message,
            Dispatch::Usage(text) => Message::text(text),
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Dispatch::Usage(_))
    }
}

/// Run a command from raw message text.
///
/// `invocation` is the name the user typed (any alias); it is stripped from
/// the front of `raw` before tokenizing.
pub fn run(
    command: &Command,
    user: &str,
    raw: &str,
    invocation: &str,
    platform: Platform,
) -> Dispatch {
    let text = strip_invocation(raw, invocation);
    let fields = parse_arguments(text, &command.text);
    run_fields(command, user, fields, platform)
}

/// Run a command from an already-structured field map, e.g. the options of a
/// native slash-command interaction.
pub fn run_fields(command: &Command, user: &str, mut fields: FieldMap, platform: Platform) -> Dispatch {
    fields.inject_context(user, platform);

    if let Some(missing) = command.text.arguments.iter().find(|a| !fields.contains(a)) {
        debug!(command = %command.name(), argument = %missing, "missing required argument");
        return Dispatch::Usage(usage(&command.text));
    }

    info!(command = %command.name(), user = %user, platform = %platform, "running command");
    Dispatch::Reply(command.handler.invoke(&fields))
}

/// Usage text listing required and optional fields and an example invocation.
///
/// ```text
/// Required: name
/// Optional: loud | times
/// Example: `/greet name --loud=value --times=value`
/// ```
pub fn usage(command: &TextCommand) -> String {
    let mut lines = Vec::new();
    if !command.arguments.is_empty() {
        lines.push(format!("Required: {}", command.arguments.join(" | ")));
    }
    if !command.options.is_empty() {
        lines.push(format!("Optional: {}", command.options.join(" | ")));
    }

    let mut example = format!("/{}", command.name());
    for argument in &command.arguments {
        example.push(' ');
        example.push_str(argument);
    }
    for option in &command.options {
        example.push_str(&format!(" --{}=value", option));
    }
    lines.push(format!("Example: `{}`", example));

    lines.join("\n")
}

/// Routes `/alias ...` text to the matching command.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    commands: CommandSet,
    bot_username: Option<String>,
}

impl Dispatcher {
    pub fn new(commands: CommandSet) -> Self {
        Self {
            commands,
            bot_username: None,
        }
    }

    /// Ignore `/cmd@other_bot` invocations aimed at a different bot.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        let username: String = username.into();
        let username = username.trim_start_matches('@').to_string();
        self.bot_username = (!username.is_empty()).then_some(username);
        self
    }

    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Dispatch a chat message. Returns `None` when the text is not a command
    /// for this bot.
    ///
    /// A leading `@bot_username` word (what Telegram puts in front of an
    /// inline-query pre-fill) is skipped when it names this bot.
    pub fn dispatch_text(&self, user: &str, raw: &str, platform: Platform) -> Option<Dispatch> {
        let raw = self.skip_own_mention(raw);
        if !raw.trim_start().starts_with('/') {
            return None;
        }
        let invocation = invocation_word(raw)?;

        if let (Some(mention), Some(ours)) = (invocation.mention, self.bot_username.as_deref()) {
            if !mention.eq_ignore_ascii_case(ours) {
                debug!(mention = %mention, "command addressed to another bot");
                return None;
            }
        }

        let Some(command) = self.commands.find(invocation.name) else {
            debug!(command = %invocation.name, "unknown command");
            return None;
        };
        Some(run(command, user, raw, invocation.name, platform))
    }

    fn skip_own_mention<'a>(&self, raw: &'a str) -> &'a str {
        let Some(ours) = self.bot_username.as_deref() else {
            return raw;
        };
        let Some(mention) = raw.trim_start().strip_prefix('@') else {
            return raw;
        };
        let end = mention.find(char::is_whitespace).unwrap_or(mention.len());
        if mention[..end].eq_ignore_ascii_case(ours) {
            mention[end..].trim_start()
        } else {
            raw
        }
    }

    /// Dispatch a structured invocation by command name.
    pub fn dispatch_fields(
        &self,
        name: &str,
        user: &str,
        fields: FieldMap,
        platform: Platform,
    ) -> Option<Dispatch> {
        let command = self.commands.find(name)?;
        Some(run_fields(command, user, fields, platform))
    }
}
