//! Side-by-side row model and alignment.
//!
//! [`align`] turns a classified line stream into the rows a dual-column view
//! renders directly: context lines occupy both columns, deletion runs are
//! paired positionally against the addition run that immediately follows, and
//! whichever run is shorter is padded with empty cells.

use serde::Serialize;

use super::line::RawLine;

/// Kind discriminant carried by every cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Context,
    Deletion,
    Addition,
    Empty,
}

/// One side of a side-by-side row.
///
/// The empty cell (padding for the shorter run) has no line number and no
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub line_num: Option<u32>,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: CellKind,
}

impl Cell {
    #[must_use]
    pub fn context(line_num: u32, content: &str) -> Self {
        Self {
            line_num: Some(line_num),
            content: content.to_string(),
            kind: CellKind::Context,
        }
    }

    #[must_use]
    pub fn deletion(line_num: u32, content: &str) -> Self {
        Self {
            line_num: Some(line_num),
            content: content.to_string(),
            kind: CellKind::Deletion,
        }
    }

    #[must_use]
    pub fn addition(line_num: u32, content: &str) -> Self {
        Self {
            line_num: Some(line_num),
            content: content.to_string(),
            kind: CellKind::Addition,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            line_num: None,
            content: String::new(),
            kind: CellKind::Empty,
        }
    }

    /// Whether this cell is alignment padding
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }
}

/// One rendered row of the side-by-side view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Row {
    /// Unchanged line shown in both columns
    Context { left: Cell, right: Cell },
    /// Paired deletion/addition; at most one side is the empty cell
    Change { left: Cell, right: Cell },
    /// Banner row carrying the hunk's own header metadata
    HunkHeader {
        content: String,
        old_start: u32,
        new_start: u32,
    },
}

/// Align classified lines into side-by-side rows.
///
/// - A context line becomes one [`Row::Context`] with the same content in
///   both cells.
/// - A deletion opens a run: the maximal block of consecutive deletions is
///   paired index-by-index with the maximal block of additions immediately
///   after it. The pairing emits `max(deletions, additions)` change rows,
///   padding the shorter side with empty cells.
/// - An addition with no preceding deletion run becomes one change row with
///   an empty left cell.
///
/// The pairing is strictly positional; no content similarity is considered.
/// The hunk banner row is not produced here, assembly prepends it.
#[must_use]
pub fn align(lines: &[RawLine]) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match &lines[i] {
            RawLine::Context {
                old_line,
                new_line,
                content,
            } => {
                rows.push(Row::Context {
                    left: Cell::context(*old_line, content),
                    right: Cell::context(*new_line, content),
                });
                i += 1;
            }
            RawLine::Deletion { .. } => {
                let deletions_start = i;
                while matches!(lines.get(i), Some(RawLine::Deletion { .. })) {
                    i += 1;
                }
                let additions_start = i;
                while matches!(lines.get(i), Some(RawLine::Addition { .. })) {
                    i += 1;
                }

                let deletions = &lines[deletions_start..additions_start];
                let additions = &lines[additions_start..i];

                for pair in 0..deletions.len().max(additions.len()) {
                    let left = match deletions.get(pair) {
                        Some(RawLine::Deletion { old_line, content }) => {
                            Cell::deletion(*old_line, content)
                        }
                        _ => Cell::empty(),
                    };
                    let right = match additions.get(pair) {
                        Some(RawLine::Addition { new_line, content }) => {
                            Cell::addition(*new_line, content)
                        }
                        _ => Cell::empty(),
                    };
                    rows.push(Row::Change { left, right });
                }
            }
            RawLine::Addition { new_line, content } => {
                rows.push(Row::Change {
                    left: Cell::empty(),
                    right: Cell::addition(*new_line, content),
                });
                i += 1;
            }
        }
    }

    rows
}
