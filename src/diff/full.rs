//! Whole-diff parsing: scans the input for file sections and decodes each in
//! order. Prose around the sections is tolerated and skipped; any failure
//! inside a section fails the whole parse.

use serde::Serialize;

use super::cursor::LineCursor;
use super::file::{FileDiff, parse_section};
use super::summary::{DiffSummary, summarize};
use crate::ParseError;

/// A complete parsed diff covering any number of files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diff {
    pub files: Vec<FileDiff>,
}

impl Diff {
    /// Parse complete diff text.
    ///
    /// Blank input yields an empty diff. Leading prose (commit messages,
    /// mail headers) is skipped; input that never reaches a file section
    /// fails with [`ParseError::MalformedDiff`], as does a hunk header
    /// outside any section. No partial result is ever returned.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        if text.trim().is_empty() {
            return Ok(Self { files: Vec::new() });
        }

        let mut cursor = LineCursor::new(text);

        while !cursor.at_section_start() {
            match cursor.peek() {
                Some(line) if line.starts_with("@@") => return Err(ParseError::MalformedDiff),
                Some(line) => {
                    log::trace!("skipping leading line: {line}");
                    cursor.advance();
                }
                None => return Err(ParseError::MalformedDiff),
            }
        }

        let mut files = Vec::new();
        while let Some(line) = cursor.peek() {
            if cursor.at_section_start() {
                files.push(parse_section(&mut cursor)?);
            } else if line.starts_with("@@") {
                return Err(ParseError::MalformedDiff);
            } else {
                log::trace!("skipping line between sections: {line}");
                cursor.advance();
            }
        }

        log::debug!("parsed {} file sections", files.len());
        Ok(Self { files })
    }

    /// Parse raw bytes, replacing undecodable sequences before parsing
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    /// Aggregate statistics over all files
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        summarize(&self.files)
    }
}
