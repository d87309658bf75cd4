//! Classification of hunk body lines.
//!
//! A hunk body is a sequence of `(marker, text)` pairs where the marker is
//! the first character of the raw line: `' '` for context, `'-'` for a
//! deletion, `'+'` for an addition. [`classify`] walks that sequence with two
//! line-number cursors seeded from the hunk header, one per file side, and
//! produces [`RawLine`] values carrying the numbers each side will display.

use error_set::error_set;

error_set! {
    /// Errors from classifying hunk body lines
    ClassifyError := {
        /// Line began with something other than ' ', '-' or '+'
        #[display("Unrecognized line marker '{marker}'")]
        UnknownMarker { marker: char },
    }
}

/// A classified hunk body line with its line numbers assigned.
///
/// Context lines exist on both sides and carry both numbers; deletions only
/// exist in the old file, additions only in the new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine {
    /// Line present in both versions
    Context {
        old_line: u32,
        new_line: u32,
        content: String,
    },
    /// Line removed from the old version
    Deletion { old_line: u32, content: String },
    /// Line added in the new version
    Addition { new_line: u32, content: String },
}

impl RawLine {
    /// Line content with terminators stripped
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            RawLine::Context { content, .. }
            | RawLine::Deletion { content, .. }
            | RawLine::Addition { content, .. } => content,
        }
    }

    /// Old-side line number, if the line exists in the old file
    #[must_use]
    pub fn old_line(&self) -> Option<u32> {
        match self {
            RawLine::Context { old_line, .. } | RawLine::Deletion { old_line, .. } => {
                Some(*old_line)
            }
            RawLine::Addition { .. } => None,
        }
    }

    /// New-side line number, if the line exists in the new file
    #[must_use]
    pub fn new_line(&self) -> Option<u32> {
        match self {
            RawLine::Context { new_line, .. } | RawLine::Addition { new_line, .. } => {
                Some(*new_line)
            }
            RawLine::Deletion { .. } => None,
        }
    }
}

/// Classify hunk body lines and assign line numbers to each side.
///
/// `old_start` and `new_start` seed the two cursors. A context line takes the
/// current value of both cursors and advances both; a deletion takes only the
/// old cursor and advances it; an addition takes only the new cursor and
/// advances it. Trailing `\n`/`\r` characters are stripped from content.
///
/// # Errors
///
/// Returns [`ClassifyError::UnknownMarker`] when a marker is not one of
/// `' '`, `'-'`, `'+'`.
pub fn classify(
    old_start: u32,
    new_start: u32,
    lines: &[(char, &str)],
) -> Result<Vec<RawLine>, ClassifyError> {
    let mut old_cursor = old_start;
    let mut new_cursor = new_start;
    let mut classified = Vec::new();

    for &(marker, text) in lines {
        let content = text.trim_end_matches(['\n', '\r']).to_string();
        match marker {
            ' ' => {
                classified.push(RawLine::Context {
                    old_line: old_cursor,
                    new_line: new_cursor,
                    content,
                });
                old_cursor += 1;
                new_cursor += 1;
            }
            '-' => {
                classified.push(RawLine::Deletion {
                    old_line: old_cursor,
                    content,
                });
                old_cursor += 1;
            }
            '+' => {
                classified.push(RawLine::Addition {
                    new_line: new_cursor,
                    content,
                });
                new_cursor += 1;
            }
            marker => return Err(ClassifyError::UnknownMarker { marker }),
        }
    }

    Ok(classified)
}
