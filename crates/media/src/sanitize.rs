use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("pattern is valid"));

/// Reduce a caller-supplied filename to a safe, flat ASCII name.
///
/// Path separators become spaces, non-ASCII characters are dropped, runs of
/// whitespace are joined with `_`, anything outside `[A-Za-z0-9_.-]` is
/// removed, and leading or trailing `.` and `_` are trimmed. Returns `None`
/// when nothing usable remains.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let ascii: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = DISALLOWED.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c == '_');

    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Replace the extension of `name` with `ext`.
///
/// A leading dot on the final path component (as in `.profile`) is part of the
/// stem, not an extension.
pub(crate) fn with_extension(name: &str, ext: &str) -> String {
    let component_start = name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let component = &name[component_start..];
    let stem_len = component
        .rfind('.')
        .filter(|&dot| !component[..dot].chars().all(|c| c == '.'))
        .unwrap_or(component.len());

    format!("{}.{ext}", &name[..component_start + stem_len])
}
