//! Extraction of canonical video IDs from user-entered text.

/// Markers that precede a video ID in the URL forms YouTube hands out.
///
/// Checked in order; the first marker that yields a valid candidate wins.
const ID_MARKERS: &[&str] = &["v=", "youtu.be/", "/embed/"];

/// Extracts the canonical 11-character video ID from arbitrary user input.
///
/// Accepts either a bare video ID or any of the common YouTube URL shapes
/// (`watch?v=`, `youtu.be/`, `/embed/`). The input is trimmed before
/// evaluation. Returns `None` if no valid ID can be found; this function
/// never fails and has no side effects.
pub fn extract_video_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_candidate(trimmed) {
        return Some(trimmed.to_string());
    }

    ID_MARKERS
        .iter()
        .find_map(|marker| id_after_marker(trimmed, marker))
}

/// Whether `candidate` has the shape of a YouTube video ID: exactly 11
/// characters, each alphanumeric, `-`, or `_`.
fn is_candidate(candidate: &str) -> bool {
    candidate.len() == 11
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Looks for `marker` in `text` and returns the candidate that follows it,
/// truncated at the first `?`, `&`, or `#`.
fn id_after_marker(text: &str, marker: &str) -> Option<String> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = rest
        .find(['?', '&', '#'])
        .unwrap_or(rest.len());
    let candidate = &rest[..end];
    is_candidate(candidate).then(|| candidate.to_string())
}
