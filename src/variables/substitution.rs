//! Variable substitution engine
//!
//! Replaces `{{name}}` placeholders in request text with values bound in the
//! active environment. Substitution is a single pass: a resolved value is
//! never scanned again, and names without a binding are left as written so the
//! user can see what is missing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Environment bindings after parsing, name to value.
pub type Variables = HashMap<String, String>;

/// Cached regex pattern for matching `{{name}}` with optional whitespace.
///
/// The inner group is lazy so `{{a}}{{b}}` yields two matches, and `.` does
/// not cross line breaks, so an unterminated `{{name` never swallows the rest
/// of a multi-line body.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("Failed to compile placeholder regex"));

/// Substitutes every `{{name}}` in `text` whose trimmed name is bound in `env`.
///
/// Placeholders naming an unknown variable pass through verbatim, braces
/// included. An empty-string binding is a real substitution and removes the
/// placeholder.
///
/// # Examples
///
/// ```
/// use gostman::variables::{resolve, Variables};
///
/// let mut env = Variables::new();
/// env.insert("name".to_string(), "World".to_string());
///
/// assert_eq!(resolve("Hello {{ name }}", &env), "Hello World");
/// assert_eq!(resolve("Hello {{missing}}", &env), "Hello {{missing}}");
/// ```
pub fn resolve(text: &str, env: &Variables) -> String {
    // Fast path: nothing to substitute
    if env.is_empty() || !text.contains("{{") {
        return text.to_string();
    }

    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps[1].trim();
            match env.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Parses environment text into bindings.
///
/// Blank text is treated as an empty environment. Anything else must be a
/// JSON object whose values are all strings.
///
/// # Errors
///
/// Returns the underlying `serde_json::Error` when the text is not a
/// string-to-string JSON object.
pub fn parse_environment(text: &str) -> Result<Variables, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Variables::new());
    }
    serde_json::from_str(text)
}

/// Returns the trimmed placeholder names in `text`, in order of first use.
pub fn placeholder_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(text) {
        let name = caps[1].trim();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
