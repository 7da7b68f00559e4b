//! Text run normalization.

use std::borrow::Cow;

/// Normalize line breaks of text outside literal blocks.
///
/// A blank line (`"\n\n"`) becomes a line break and every other newline
/// becomes a space. Pairs are matched left to right, so `"\n\n\n"` yields
/// `"\n "`.
pub fn normalize(text: &str) -> Cow<'_, str> {
    if !text.contains('\n') {
        return Cow::Borrowed(text);
    }
    let joined = text
        .split("\n\n")
        .map(|part| part.replace('\n', " "))
        .collect::<Vec<_>>()
        .join("\n");
    Cow::Owned(joined)
}
