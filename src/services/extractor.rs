const CODE_FENCE: &str = "```";

/// Parses raw model output into candidate titles
///
/// Lines are trimmed and blank lines dropped; order is the model's emission
/// order and duplicates are kept. A markdown code fence wrapping the whole
/// reply is ignored, but text glued to a fence is kept. Never fails: unusable
/// input yields an empty list.
pub fn extract_titles(raw: &str) -> Vec<String> {
    let mut lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let opening = lines.first().copied();
    if let Some(rest) = opening.and_then(|line| line.strip_prefix(CODE_FENCE)) {
        let rest = rest.trim();
        if is_language_tag(rest) {
            lines.remove(0);
        } else {
            lines[0] = rest;
        }
    }
    let closing = lines.last().copied();
    if let Some(rest) = closing.and_then(|line| line.strip_suffix(CODE_FENCE)) {
        let rest = rest.trim();
        if rest.is_empty() {
            lines.pop();
        } else if let Some(last) = lines.last_mut() {
            *last = rest;
        }
    }

    lines.into_iter().map(str::to_string).collect()
}

/// Empty, or a lowercase info string such as `text` or `markdown`
fn is_language_tag(rest: &str) -> bool {
    rest.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '+'))
}
