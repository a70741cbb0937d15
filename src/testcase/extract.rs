//! Locating a JSON array inside free-form collaborator text.

use crate::error::{TaskforgeError, TaskforgeResult};

const FENCE: &str = "```";

/// Returns the JSON array embedded in `text`.
///
/// A fenced block tagged `json` wins when it holds a balanced array; otherwise
/// the span from the first `[` to the last `]` is used.
///
/// # Errors
///
/// [`TaskforgeError::MalformedTestData`] when neither candidate is a non-empty,
/// bracket-balanced array.
pub fn extract_json_array(text: &str) -> TaskforgeResult<&str> {
    if let Some(block) = fenced_json_block(text) {
        if is_balanced_array(block) {
            return Ok(block);
        }
    }

    let span = match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => text[start..=end].trim(),
        _ => return Err(TaskforgeError::MalformedTestData("no JSON array found".into())),
    };
    if is_balanced_array(span) {
        Ok(span)
    } else {
        Err(TaskforgeError::MalformedTestData("JSON array brackets are unbalanced".into()))
    }
}

/// Contents of the first fence whose info string is `json`.
fn fenced_json_block(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some(open) = rest.find(FENCE) {
        let after = &rest[open + FENCE.len()..];
        let line_end = after.find('\n')?;
        let info = after[..line_end].trim();
        let body = &after[line_end + 1..];
        let close = body.find(FENCE)?;
        if info.eq_ignore_ascii_case("json") {
            return Some(body[..close].trim());
        }
        rest = &body[close + FENCE.len()..];
    }
    None
}

/// True when `text` is a single `[...]` whose brackets and braces nest
/// correctly outside of string literals.
fn is_balanced_array(text: &str) -> bool {
    if !text.starts_with('[') || !text.ends_with(']') {
        return false;
    }
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => stack.push(c),
            ']' | '}' => {
                let expected = if c == ']' { '[' } else { '{' };
                if stack.pop() != Some(expected) {
                    return false;
                }
                // The outer array must close at the very end.
                if stack.is_empty() && i + c.len_utf8() != text.len() {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty() && !in_string
}
