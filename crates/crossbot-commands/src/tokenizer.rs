//! Command-text tokenizer.
//!
//! Turns `"/greet \"hello world\" --loud"` into `{name: "hello world", loud: ""}`
//! according to a [`TextCommand`] descriptor:
//!
//! - segments are split on the command's delimiter and trimmed; empty ones are skipped
//! - a segment opening with `"` swallows following segments until one closes the quote
//! - `-x`, `--x`, `–x`, `—x` are flags; `--x=value` carries a value, quoted values may span segments
//! - anything else fills the next unfilled positional argument; extras are dropped
//!
//! The default delimiter splits on every whitespace character so that
//! multi-line text (and prompt pre-fills, which put one flag per line)
//! tokenizes the same as single-line text. When a quoted value spans
//! segments the original separators are re-inserted verbatim.

use crossbot_core::FieldMap;
use tracing::debug;

use crate::descriptor::{TextCommand, DEFAULT_DELIMITER};

/// Leading characters that mark a flag. Phone keyboards often turn `--` into
/// an en or em dash.
const DASHES: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

/// Parse full command text, skipping a leading invocation word that names one
/// of the command's aliases (`greet`, `/greet`, `/greet@bot`).
///
/// With an empty delimiter the message is returned verbatim under the `""` key.
pub fn parse_fields(message: &str, command: &TextCommand) -> FieldMap {
    if command.delimiter().is_empty() {
        return raw_fields(message);
    }

    let rest = match invocation_word(message) {
        Some(inv) if command.matches_alias(inv.name) => inv.rest,
        _ => message,
    };
    parse_arguments(rest, command)
}

/// Parse text that no longer carries the invocation word.
pub fn parse_arguments(text: &str, command: &TextCommand) -> FieldMap {
    let delimiter = command.delimiter();
    if delimiter.is_empty() {
        return raw_fields(text);
    }

    let segments = split(text, delimiter);
    let mut fields = FieldMap::new();
    let mut next_argument = 0;
    let mut i = 0;

    while i < segments.len() {
        let lead = segments[i].text.trim_start();
        let segment = lead.trim_end();
        i += 1;

        if segment.is_empty() {
            continue;
        }

        if segment.starts_with(DASHES) {
            let flag = lead.trim_start_matches(DASHES);
            let (key, value) = match flag.split_once('=') {
                Some((key, value_lead)) => {
                    let (value, consumed) = read_value(value_lead, &segments[i..]);
                    i += consumed;
                    (key.trim(), value)
                }
                None => (flag.trim(), String::new()),
            };

            if key.is_empty() {
                continue;
            }
            if command.has_option(key) {
                fields.insert(key, value);
            } else {
                debug!(command = %command.name(), flag = %key, "dropping unrecognized flag");
            }
            continue;
        }

        let (value, consumed) = read_value(lead, &segments[i..]);
        i += consumed;

        match command.arguments.get(next_argument) {
            Some(name) => {
                fields.insert(name.as_str(), value);
                next_argument += 1;
            }
            None => debug!(command = %command.name(), "discarding excess positional token"),
        }
    }

    fields
}

/// Remove a leading `/invocation` (optionally `@botname`-suffixed) from `text`.
///
/// Returns `text` unchanged when it does not start with `invocation`.
pub fn strip_invocation<'a>(text: &'a str, invocation: &str) -> &'a str {
    match invocation_word(text) {
        Some(inv) if inv.name.eq_ignore_ascii_case(invocation) => inv.rest,
        _ => text,
    }
}

/// The first word of a command invocation, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Invocation<'a> {
    /// Command name without `/` or `@mention`.
    pub name: &'a str,
    /// Bot username after `@`, if present.
    pub mention: Option<&'a str>,
    /// Remaining text with leading whitespace removed.
    pub rest: &'a str,
}

pub(crate) fn invocation_word(text: &str) -> Option<Invocation<'_>> {
    let text = text.trim_start();
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    let token = &text[..end];
    let rest = text[end..].trim_start();

    let token = token.strip_prefix('/').unwrap_or(token);
    let (name, mention) = match token.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (token, None),
    };
    if name.is_empty() {
        return None;
    }
    Some(Invocation {
        name,
        mention,
        rest,
    })
}

fn raw_fields(message: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("", message);
    fields
}

/// A delimiter-separated piece of the input together with the separator that
/// preceded it.
#[derive(Debug, Clone, Copy)]
struct Segment<'a> {
    sep: &'a str,
    text: &'a str,
}

fn split<'a>(text: &'a str, delimiter: &'a str) -> Vec<Segment<'a>> {
    if delimiter != DEFAULT_DELIMITER {
        return text
            .split(delimiter)
            .enumerate()
            .map(|(n, text)| Segment {
                sep: if n == 0 { "" } else { delimiter },
                text,
            })
            .collect();
    }

    let mut out = Vec::new();
    let mut start = 0;
    let mut sep = "";
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            out.push(Segment {
                sep,
                text: &text[start..idx],
            });
            let next = idx + ch.len_utf8();
            sep = &text[idx..next];
            start = next;
        }
    }
    out.push(Segment {
        sep,
        text: &text[start..],
    });
    out
}

/// Read a value that may be quoted and may continue into `rest`.
///
/// Returns the unquoted value and how many segments of `rest` it consumed.
/// An unterminated quote consumes everything.
fn read_value(lead: &str, rest: &[Segment<'_>]) -> (String, usize) {
    let trimmed = lead.trim_end();
    let Some(body) = trimmed.strip_prefix('"') else {
        return (trimmed.to_string(), 0);
    };
    if let Some(inner) = closing_quote(body) {
        return (unescape(inner), 0);
    }

    let mut acc = lead[1..].to_string();
    for (n, segment) in rest.iter().enumerate() {
        acc.push_str(segment.sep);
        acc.push_str(segment.text);
        if let Some(inner) = closing_quote(acc.trim_end()) {
            return (unescape(inner), n + 1);
        }
    }
    (unescape(acc.trim_end()), rest.len())
}

/// If `s` ends with an unescaped `"`, return `s` without it.
fn closing_quote(s: &str) -> Option<&str> {
    let inner = s.strip_suffix('"')?;
    let backslashes = inner.chars().rev().take_while(|&c| c == '\\').count();
    (backslashes % 2 == 0).then_some(inner)
}

/// Undo `\"` and `\\` escapes. Other backslashes are kept as typed.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '"' || next == '\\' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
