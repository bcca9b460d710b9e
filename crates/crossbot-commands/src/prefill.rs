use crossbot_core::Prompt;

/// Render a [`Prompt`] as the command text a user would type to resubmit it.
///
/// ```text
/// /edit
///
/// --title="Hello"
/// --body="say \"hi\""
/// ```
///
/// Each value is quoted with `\` and `"` escaped, so feeding the result back
/// through the tokenizer (with the prompt keys declared as options) yields the
/// same key/value pairs. Keys are written as given and should be valid option
/// names.
pub fn encode_prompt(prompt: &Prompt) -> String {
    let mut out = prompt.prefix.clone();
    if prompt.fields.is_empty() {
        return out;
    }

    out.push_str("\n\n");
    let lines: Vec<String> = prompt
        .fields
        .iter()
        .map(|field| format!("--{}=\"{}\"", field.key, escape(&field.value)))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
