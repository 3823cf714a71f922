//! Pick the frame shown on a node or edge label.
//!
//! Stacks are stored root first, so the innermost frames are at the end.
//! The innermost frame is usually the scheduler plumbing itself, so frames
//! mentioning the skip keyword are passed over.

/// Displayed context of a stack
///
/// Searches from the last frame backward for the first frame not containing
/// `skip_keyword`. If every frame contains it, all frames are concatenated.
/// An empty stack yields an empty string. Newlines become `;`.
pub fn display_context<S: AsRef<str>>(frames: &[S], skip_keyword: &str) -> String {
    let frames: Vec<&str> = frames.iter().map(|frame| frame.as_ref()).collect();

    let chosen = frames
        .iter()
        .rev()
        .find(|frame| skip_keyword.is_empty() || !frame.contains(skip_keyword));

    let text = match chosen {
        Some(frame) => frame.to_string(),
        None => frames.concat(),
    };

    text.replace('\n', ";")
}

/// Escape text for use inside a double-quoted DOT string
pub fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
