//! User input cleanup before submission.

use std::sync::OnceLock;

use regex::Regex;

fn markup_pattern() -> &'static Regex {
    static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid regex"))
}

/// Strips markup tags and control characters, then trims surrounding
/// whitespace.
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    let without_markup = markup_pattern().replace_all(input, "");

    without_markup
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitizes an email address and lowercases it.
#[must_use]
pub fn sanitize_email(input: &str) -> String {
    sanitize_input(input).to_lowercase()
}
