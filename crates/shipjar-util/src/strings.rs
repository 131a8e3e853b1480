//! Identifier casing used for host task names.

/// Uppercase the first character, leaving the rest untouched.
///
/// `release` becomes `Release`, `my-lib` becomes `My-lib`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a string is empty or only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Return `value` unless it is blank, in which case evaluate `fallback`.
pub fn or_if_blank(value: &str, fallback: impl FnOnce() -> Option<String>) -> Option<String> {
    if is_blank(value) {
        fallback()
    } else {
        Some(value.to_string())
    }
}
