use crate::types::User;

/// Name handed to handlers as `user`: the username when set, otherwise the
/// first and last name.
pub fn user_display(user: &User) -> String {
    match user.username.as_deref() {
        Some(username) if !username.is_empty() => username.to_string(),
        _ => {
            let last = user.last_name.as_deref().unwrap_or("");
            format!("{} {}", user.first_name, last).trim().to_string()
        }
    }
}

/// Drop this bot's mention from the front of a command.
///
/// Handles both the `/command@bot_username` suffix and the leading
/// `@bot_username ` word Telegram inserts before an inline-query pre-fill.
/// Mentions of other bots and mentions elsewhere in the text are kept.
pub fn strip_bot_mention(text: &str, bot_username: &str) -> String {
    let bot_username = bot_username.trim_start_matches('@');
    let mut trimmed = text.trim_start();
    if bot_username.is_empty() {
        return trimmed.to_string();
    }

    if let Some(mention) = trimmed.strip_prefix('@') {
        let end = mention.find(char::is_whitespace).unwrap_or(mention.len());
        if mention[..end].eq_ignore_ascii_case(bot_username) {
            trimmed = mention[end..].trim_start();
        }
    }
    if !trimmed.starts_with('/') {
        return trimmed.to_string();
    }

    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (head, rest) = trimmed.split_at(end);
    match head.split_once('@') {
        Some((command, mention)) if mention.eq_ignore_ascii_case(bot_username) => {
            format!("{}{}", command, rest)
        }
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: Option<&str>, first: &str, last: Option<&str>) -> User {
        User {
            id: 1,
            first_name: first.into(),
            last_name: last.map(Into::into),
            username: username.map(Into::into),
        }
    }

    #[test]
    fn username_wins() {
        assert_eq!(user_display(&user(Some("alice"), "Alice", Some("A"))), "alice");
    }

    #[test]
    fn falls_back_to_full_name() {
        assert_eq!(user_display(&user(None, "Alice", Some("Liddell"))), "Alice Liddell");
        assert_eq!(user_display(&user(Some(""), "Alice", None)), "Alice");
    }

    #[test]
    fn strips_own_mention_only() {
        assert_eq!(strip_bot_mention("/start@MyBot now", "mybot"), "/start now");
        assert_eq!(strip_bot_mention("/start@MyBot", "@MyBot"), "/start");
        assert_eq!(strip_bot_mention("/start@other now", "mybot"), "/start@other now");
        assert_eq!(strip_bot_mention("hi @mybot", "mybot"), "hi @mybot");
    }

    #[test]
    fn strips_leading_inline_query_mention() {
        assert_eq!(
            strip_bot_mention("@MyBot /rename\n\n--title=\"x\"", "mybot"),
            "/rename\n\n--title=\"x\""
        );
        assert_eq!(strip_bot_mention("@mybot /start@mybot go", "mybot"), "/start go");
        assert_eq!(strip_bot_mention("@mybotx /start", "mybot"), "@mybotx /start");
        assert_eq!(strip_bot_mention("@other /start", "mybot"), "@other /start");
    }
}
