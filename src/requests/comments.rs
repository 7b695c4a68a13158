//! Trailing-comment removal for hand-written JSON.
//!
//! Request lists are maintained by hand and annotated with `#` or `//`
//! comments at the ends of lines. [`strip_comments`] removes those comments
//! so the result can be handed to a strict JSON parser. It works line by
//! line and knows about string literals, so a `#` or `//` inside a quoted
//! value (a URL, a filename template) is left alone.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static COMMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#|//").expect("comment marker pattern is valid"));

/// Remove trailing `#` and `//` comments from every line of `document`.
///
/// Lines without a comment are returned untouched, including their
/// whitespace. A commented line keeps everything before the comment, minus
/// trailing whitespace. Line breaks are preserved so parser errors still
/// point at the right line.
///
/// # Examples
///
/// ```rust
/// use mass_requests::requests::strip_comments;
///
/// let text = "{\n  \"name\": \"tas\",  # 1.5m temperature\n  \"url\": \"http://x\"\n}";
/// assert_eq!(strip_comments(text), "{\n  \"name\": \"tas\",\n  \"url\": \"http://x\"\n}");
/// ```
#[must_use]
pub fn strip_comments(document: &str) -> String {
    document.split('\n').map(strip_line).collect::<Vec<_>>().join("\n")
}

fn strip_line(line: &str) -> Cow<'_, str> {
    if !COMMENT_MARKER.is_match(line) {
        return Cow::Borrowed(line);
    }
    match comment_start(line) {
        Some(index) => Cow::Owned(line[..index].trim_end().to_string()),
        None => Cow::Borrowed(line),
    }
}

/// Byte offset of the first comment marker outside a string literal.
fn comment_start(line: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = line.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '#' => return Some(index),
            '/' if matches!(chars.peek(), Some((_, '/'))) => return Some(index),
            _ => {}
        }
    }
    None
}
