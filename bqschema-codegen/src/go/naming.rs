//! Identifier normalization for Go declarations.

/// Character that is valid in catalog identifiers but not in Go ones.
const INVALID_CHAR: char = '-';
const REPLACEMENT: &str = "_";

/// Turns a catalog identifier into an exported Go identifier.
///
/// Hyphens become underscores first, then only the first character is
/// upper-cased; the rest is kept as is, so `snake_case` names are not
/// camel-cased. The empty string maps to itself.
#[must_use]
pub fn normalize_identifier(raw: &str) -> String {
    let sanitized = if raw.contains(INVALID_CHAR) {
        let replaced = raw.replace(INVALID_CHAR, REPLACEMENT);
        tracing::warn!(
            "Identifier {:?} contains {:?}; using {:?} instead",
            raw,
            INVALID_CHAR,
            replaced
        );
        replaced
    } else {
        raw.to_string()
    };

    capitalize_initial(&sanitized)
}

/// Upper-cases the first character and leaves the rest untouched.
#[must_use]
pub fn capitalize_initial(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
