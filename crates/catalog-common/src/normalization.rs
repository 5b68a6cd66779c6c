use unicode_normalization::UnicodeNormalization;

/// Normalize a route path: NFC, trim, collapse repeated `/`, drop the trailing
/// `/`, and force a leading one. The empty path becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let nfc: String = path.trim().nfc().collect();
    let mut result = String::with_capacity(nfc.len() + 1);
    for segment in nfc.split('/').filter(|s| !s.is_empty()) {
        result.push('/');
        result.push_str(segment);
    }
    if result.is_empty() {
        result.push('/');
    }
    result
}

/// Non-empty segments of a path, in order.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Display name for a slug with no taxonomy node: split on `-`, title-case
/// each token, join with spaces. `zzz-unknown` becomes `Zzz Unknown`.
pub fn title_case_slug(segment: &str) -> String {
    segment
        .split('-')
        .filter(|t| !t.is_empty())
        .map(title_case_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_token(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase and treat `-`, `_` and runs of whitespace as a single space, so
/// `Disk-Full`, `disk_full` and `disk  full` compare equal.
pub fn loose_token(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
