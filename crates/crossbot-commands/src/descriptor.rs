use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crossbot_core::{CrossbotError, Handler, Result, PLATFORM_KEY, USER_KEY};
use tracing::debug;

/// Separator used when a command does not override it.
pub const DEFAULT_DELIMITER: &str = " ";

/// Static description of how a command is invoked from text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextCommand {
    /// Invocation names without the leading `/`. The first one is canonical.
    pub aliases: Vec<String>,
    /// One-line summary shown in platform command menus.
    pub description: String,
    /// Positional argument names. Tokens bind to them in this order.
    pub arguments: Vec<String>,
    /// Recognized `--flag` names, in the order they are listed in usage text.
    pub options: Vec<String>,
    /// Segment separator. `None` means [`DEFAULT_DELIMITER`]; `Some("")`
    /// disables splitting and hands the raw text to the handler under `""`.
    pub delimiter: Option<String>,
}

impl TextCommand {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>) -> Self {
        self.arguments.push(name.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>) -> Self {
        self.options.push(name.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Canonical name (first alias), or `""` for a descriptor with no aliases.
    pub fn name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or("")
    }

    pub fn delimiter(&self) -> &str {
        self.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|o| o == name)
    }

    /// Alias match, ignoring ASCII case.
    pub fn matches_alias(&self, word: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(word))
    }

    /// Check the descriptor for programmer errors.
    ///
    /// Run once when the command is built so a bad descriptor fails at
    /// startup instead of on some later request.
    pub fn validate(&self) -> Result<()> {
        let command = self.name();

        if self.aliases.is_empty() {
            return Err(CrossbotError::invalid_command(
                command,
                "at least one alias is required",
            ));
        }

        let mut seen_aliases = HashSet::new();
        for alias in &self.aliases {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(CrossbotError::invalid_command(
                    command,
                    format!("alias `{}` must be a single non-empty word", alias),
                ));
            }
            if alias.starts_with('/') || alias.contains('@') {
                return Err(CrossbotError::invalid_command(
                    command,
                    format!("alias `{}` must not contain `/` or `@`", alias),
                ));
            }
            if !seen_aliases.insert(alias.to_ascii_lowercase()) {
                return Err(CrossbotError::invalid_command(
                    command,
                    format!("alias `{}` is listed twice", alias),
                ));
            }
        }

        if self.delimiter().is_empty() && !self.arguments.is_empty() {
            return Err(CrossbotError::invalid_command(
                command,
                "raw-text commands (empty delimiter) cannot declare positional arguments",
            ));
        }

        let mut seen_names = HashSet::new();
        for name in self.arguments.iter().chain(self.options.iter()) {
            if name.is_empty()
                || name.chars().any(char::is_whitespace)
                || name.contains('=')
                || name.starts_with(['-', '\u{2013}', '\u{2014}'])
            {
                return Err(CrossbotError::invalid_command(
                    command,
                    format!("field name `{}` is not a valid flag or argument name", name),
                ));
            }
            if name == USER_KEY || name == PLATFORM_KEY {
                return Err(CrossbotError::invalid_command(
                    command,
                    format!("field name `{}` is reserved", name),
                ));
            }
            if !seen_names.insert(name.as_str()) {
                return Err(CrossbotError::invalid_command(
                    command,
                    format!("field name `{}` is declared twice", name),
                ));
            }
        }

        Ok(())
    }
}

/// A validated [`TextCommand`] bound to its handler.
#[derive(Clone)]
pub struct Command {
    pub text: TextCommand,
    pub handler: Arc<dyn Handler>,
}

impl Command {
    /// Bind a handler to a descriptor, validating the descriptor first.
    pub fn new(text: TextCommand, handler: Arc<dyn Handler>) -> Result<Self> {
        text.validate()?;
        Ok(Self { text, handler })
    }

    pub fn name(&self) -> &str {
        self.text.name()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("text", &self.text).finish()
    }
}

/// The commands one bot exposes, indexed by alias.
///
/// Built once at startup. Adapters read it to build their platform's
/// command-menu payloads and the [`Dispatcher`](crate::Dispatcher) uses it to
/// route text invocations.
#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    /// Kept in registration order for deterministic menus.
    commands: Vec<Command>,
    /// Lowercased alias → index into `commands`.
    by_alias: HashMap<String, usize>,
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. Fails without modifying the set if any alias is taken.
    pub fn register(&mut self, command: Command) -> Result<()> {
        for alias in &command.text.aliases {
            if self.by_alias.contains_key(&alias.to_ascii_lowercase()) {
                return Err(CrossbotError::DuplicateAlias {
                    alias: alias.clone(),
                });
            }
        }

        let index = self.commands.len();
        for alias in &command.text.aliases {
            self.by_alias.insert(alias.to_ascii_lowercase(), index);
        }
        debug!(command = %command.name(), aliases = command.text.aliases.len(), "command registered");
        self.commands.push(command);
        Ok(())
    }

    /// Builder form of [`CommandSet::register`].
    pub fn with(mut self, command: Command) -> Result<Self> {
        self.register(command)?;
        Ok(self)
    }

    /// Find a command by any of its aliases, ignoring ASCII case.
    pub fn find(&self, alias: &str) -> Option<&Command> {
        self.by_alias
            .get(&alias.to_ascii_lowercase())
            .map(|&i| &self.commands[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
