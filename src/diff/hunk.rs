//! Hunk parsing.
//!
//! A hunk starts with an `@@ -old_start,old_count +new_start,new_count @@`
//! header and is followed by exactly the number of body lines the two counts
//! declare. The counts drive consumption, so body content that happens to
//! look like file markers or further headers is still read as body.
//!
//! ```
//! use sidediff::HunkHeader;
//!
//! let header = HunkHeader::parse("@@ -10,4 +12,6 @@ fn main()").unwrap();
//! assert_eq!(header.old_start, 10);
//! assert_eq!(header.new_count, 6);
//! assert_eq!(header.section_header, "fn main()");
//! ```

use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{char, u32 as number},
    combinator::{all_consuming, map, opt, rest},
    sequence::preceded,
};
use serde::Serialize;

use super::cursor::LineCursor;
use super::line::{ClassifyError, RawLine, classify};
use super::row::{CellKind, Row, align};
use crate::ParseError;

/// Parsed form of an `@@` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    /// Trailing section text after the closing `@@`, empty if none
    pub section_header: String,
}

/// A `start,count` range; a missing count means 1
fn range(input: &str) -> IResult<&str, (u32, u32)> {
    map(
        (number, opt(preceded(char(','), number))),
        |(start, count)| (start, count.unwrap_or(1)),
    )
    .parse(input)
}

fn header(input: &str) -> IResult<&str, HunkHeader> {
    map(
        (
            preceded(tag("@@ -"), range),
            preceded(tag(" +"), range),
            preceded(tag(" @@"), rest),
        ),
        |((old_start, old_count), (new_start, new_count), trailer)| {
            let section = trailer.strip_prefix(' ').unwrap_or(trailer);
            HunkHeader {
                old_start,
                old_count,
                new_start,
                new_count,
                section_header: section.to_string(),
            }
        },
    )
    .parse(input)
}

impl HunkHeader {
    /// Parse a header line, returning `None` if it is not a valid `@@` header
    /// or the end of either range does not fit in a `u32`
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let (_, header) = all_consuming(header).parse(input).ok()?;

        // Classification walks a cursor from start to start + count
        let old_end = header.old_start.checked_add(header.old_count);
        let new_end = header.new_start.checked_add(header.new_count);
        if old_end.is_none() || new_end.is_none() {
            return None;
        }

        Some(header)
    }
}

/// One hunk of a file section, already aligned into side-by-side rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    pub section_header: String,
    #[serde(rename = "lines")]
    pub rows: Vec<Row>,
}

impl Hunk {
    fn assemble(header: HunkHeader, lines: &[RawLine]) -> Self {
        let HunkHeader {
            old_start,
            old_count,
            new_start,
            new_count,
            section_header,
        } = header;

        let mut rows = vec![Row::HunkHeader {
            content: section_header.clone(),
            old_start,
            new_start,
        }];
        rows.extend(align(lines));

        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            section_header,
            rows,
        }
    }

    /// Number of added lines in this hunk
    #[must_use]
    pub fn additions(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| {
                matches!(row, Row::Change { right, .. } if right.kind == CellKind::Addition)
            })
            .count()
    }

    /// Number of deleted lines in this hunk
    #[must_use]
    pub fn deletions(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, Row::Change { left, .. } if left.kind == CellKind::Deletion))
            .count()
    }
}

/// Consume the body lines the header's counts declare.
///
/// `\ No newline at end of file` markers are skipped without touching either
/// count, including any that trail the final counted line.
fn take_body<'a>(
    cursor: &mut LineCursor<'a>,
    path: &str,
    old_count: u32,
    new_count: u32,
) -> Result<Vec<(char, &'a str)>, ParseError> {
    let mut body = Vec::new();
    let mut old_remaining = old_count;
    let mut new_remaining = new_count;

    while old_remaining > 0 || new_remaining > 0 {
        let Some(line) = cursor.advance() else {
            return Err(ParseError::TruncatedHunk {
                path: path.to_string(),
            });
        };
        if line.starts_with('\\') {
            continue;
        }

        // An entirely empty line is a context line with empty content
        let (marker, text) = match line.chars().next() {
            Some(marker) => (marker, &line[marker.len_utf8()..]),
            None => (' ', ""),
        };

        match marker {
            ' ' => {
                if old_remaining == 0 || new_remaining == 0 {
                    return Err(ParseError::OverlongHunk {
                        path: path.to_string(),
                    });
                }
                old_remaining -= 1;
                new_remaining -= 1;
            }
            '-' => {
                if old_remaining == 0 {
                    return Err(ParseError::OverlongHunk {
                        path: path.to_string(),
                    });
                }
                old_remaining -= 1;
            }
            '+' => {
                if new_remaining == 0 {
                    return Err(ParseError::OverlongHunk {
                        path: path.to_string(),
                    });
                }
                new_remaining -= 1;
            }
            other => {
                return Err(ParseError::UnknownLineMarker {
                    path: path.to_string(),
                    marker: other,
                });
            }
        }
        body.push((marker, text));
    }

    while cursor.peek().is_some_and(|line| line.starts_with('\\')) {
        cursor.advance();
    }

    Ok(body)
}

/// Parse one hunk at the cursor, which must be positioned on its `@@` line
pub(crate) fn parse_hunk(cursor: &mut LineCursor<'_>, path: &str) -> Result<Hunk, ParseError> {
    let header_line = cursor.advance().unwrap_or("");
    let header = HunkHeader::parse(header_line).ok_or_else(|| ParseError::MalformedHunkHeader {
        path: path.to_string(),
        header: header_line.to_string(),
    })?;

    let body = take_body(cursor, path, header.old_count, header.new_count)?;
    let lines = classify(header.old_start, header.new_start, &body).map_err(
        |ClassifyError::UnknownMarker { marker }| ParseError::UnknownLineMarker {
            path: path.to_string(),
            marker,
        },
    )?;

    Ok(Hunk::assemble(header, &lines))
}
