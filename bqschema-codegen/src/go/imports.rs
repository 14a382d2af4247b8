//! Import block generation.

use std::collections::HashSet;

/// Builds the Go import block for the given import paths.
///
/// Duplicates are dropped; the remaining paths keep the order in which they
/// were first seen. Returns an empty string when there is nothing to import,
/// a single `import "path"` line for one path, and a parenthesized group
/// otherwise. Non-empty output ends with a blank line.
#[must_use]
pub fn aggregate_imports<I, S>(imports: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = Vec::new();
    for import in imports {
        let import = import.as_ref();
        if seen.insert(import.to_string()) {
            unique.push(import.to_string());
        }
    }

    match unique.as_slice() {
        [] => String::new(),
        [only] => format!("import \"{}\"\n\n", only),
        many => {
            let mut output = String::from("import (\n");
            for import in many {
                output.push_str(&format!("\t\"{}\"\n", import));
            }
            output.push_str(")\n\n");
            output
        }
    }
}
