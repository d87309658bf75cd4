//! File-section parsing.
//!
//! A section covers one file of a multi-file diff: a `diff --git` header (or
//! a bare `---`/`+++` marker pair), optional metadata lines, and the file's
//! hunks. Metadata decides the file status and whether a section without any
//! hunks is legitimate (binary files, pure renames, mode changes, empty-file
//! additions).

use std::fmt;

use serde::Serialize;

use super::cursor::LineCursor;
use super::hunk::{Hunk, parse_hunk};
use crate::ParseError;

/// How a file changed between the two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Modified => "modified",
            Self::Renamed => "renamed",
        };
        f.write_str(name)
    }
}

/// A complete parsed section for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    /// Display path: the new path, or the old path for deleted files
    pub path: String,
    /// Previous path, only set for renames
    pub old_path: Option<String>,
    pub status: FileStatus,
    pub additions: usize,
    pub deletions: usize,
    pub changes: usize,
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    /// Parse a single file section.
    ///
    /// The text must begin at a section start: a `diff --git` line, or a
    /// `---` line immediately followed by a `+++` line. Text after the
    /// section is ignored.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut cursor = LineCursor::new(text);
        if !cursor.at_section_start() {
            return Err(ParseError::MalformedDiff);
        }
        parse_section(&mut cursor)
    }
}

/// Everything learned from a section's header and metadata lines
#[derive(Default)]
struct SectionMeta {
    git_old: Option<String>,
    git_new: Option<String>,
    marker_old: Option<String>,
    marker_new: Option<String>,
    saw_old_marker: bool,
    saw_new_marker: bool,
    from_path: Option<String>,
    to_path: Option<String>,
    forced_status: Option<FileStatus>,
    /// Set when metadata explains a section that carries no hunks
    content_optional: bool,
}

/// Parse the file section at the cursor, leaving the cursor on the first
/// line after it
pub(crate) fn parse_section(cursor: &mut LineCursor<'_>) -> Result<FileDiff, ParseError> {
    let first_line = cursor.peek().unwrap_or("");
    let mut meta = SectionMeta::default();

    if let Some(paths) = first_line.strip_prefix("diff --git ") {
        let (old, new) =
            split_git_paths(paths).ok_or_else(|| ParseError::MalformedFileHeader {
                header: first_line.to_string(),
            })?;
        meta.git_old = Some(old);
        meta.git_new = Some(new);
        cursor.advance();
    }

    while let Some(line) = cursor.peek() {
        if line.starts_with("@@") || line.starts_with("diff --git ") {
            break;
        }
        if let Some(rest) = line.strip_prefix("--- ") {
            if meta.saw_old_marker {
                // Second marker pair means the next bare section starts here
                break;
            }
            meta.marker_old = marker_path(rest);
            meta.saw_old_marker = true;
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            if meta.saw_new_marker {
                break;
            }
            meta.marker_new = marker_path(rest);
            meta.saw_new_marker = true;
        } else if let Some(rest) = line
            .strip_prefix("rename from ")
            .or_else(|| line.strip_prefix("copy from "))
        {
            meta.from_path = Some(unquote(rest).to_string());
            meta.content_optional = true;
        } else if let Some(rest) = line
            .strip_prefix("rename to ")
            .or_else(|| line.strip_prefix("copy to "))
        {
            meta.to_path = Some(unquote(rest).to_string());
            meta.content_optional = true;
        } else if line.starts_with("new file mode") {
            meta.forced_status = Some(FileStatus::Added);
            meta.content_optional = true;
        } else if line.starts_with("deleted file mode") {
            meta.forced_status = Some(FileStatus::Deleted);
            meta.content_optional = true;
        } else if line.starts_with("old mode ")
            || line.starts_with("new mode ")
            || line.starts_with("Binary files ")
            || line.starts_with("GIT binary patch")
        {
            meta.content_optional = true;
        } else {
            log::trace!("skipping metadata line: {line}");
        }
        cursor.advance();
    }

    // The marker lines are authoritative when present (they carry the
    // /dev/null sentinel); rename/copy metadata covers sections without
    // markers, the git header line covers the rest
    let old_path = if meta.saw_old_marker {
        meta.marker_old
    } else {
        meta.from_path.or(meta.git_old)
    };
    let new_path = if meta.saw_new_marker {
        meta.marker_new
    } else {
        meta.to_path.or(meta.git_new)
    };

    let status = match meta.forced_status {
        Some(status) => status,
        None => match (&old_path, &new_path) {
            (None, _) => FileStatus::Added,
            (_, None) => FileStatus::Deleted,
            (Some(old), Some(new)) if old != new => FileStatus::Renamed,
            _ => FileStatus::Modified,
        },
    };

    let path = match (new_path, &old_path) {
        (Some(new), _) => new,
        (None, Some(old)) => old.clone(),
        (None, None) => {
            return Err(ParseError::MalformedFileHeader {
                header: first_line.to_string(),
            });
        }
    };
    let old_path = if status == FileStatus::Renamed {
        old_path
    } else {
        None
    };

    let mut hunks = Vec::new();
    while cursor.peek().is_some_and(|line| line.starts_with("@@")) {
        hunks.push(parse_hunk(cursor, &path)?);
    }

    if hunks.is_empty() && !meta.content_optional {
        return Err(ParseError::EmptySection { path });
    }

    let additions: usize = hunks.iter().map(Hunk::additions).sum();
    let deletions: usize = hunks.iter().map(Hunk::deletions).sum();

    Ok(FileDiff {
        path,
        old_path,
        status,
        additions,
        deletions,
        changes: additions + deletions,
        hunks,
    })
}

/// Strip one level of surrounding double quotes, as git writes for unusual
/// paths
fn unquote(path: &str) -> &str {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path)
}

/// Strip a leading `a/` or `b/` revision prefix
fn clean_prefix(path: &str) -> &str {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
}

/// Extract the path from a `---`/`+++` marker line: drop a tab-separated
/// timestamp suffix, surrounding quotes, and the revision prefix. The
/// `/dev/null` sentinel maps to `None`.
fn marker_path(rest: &str) -> Option<String> {
    let path = rest.split('\t').next().unwrap_or(rest).trim_end();
    let path = unquote(path);
    if path == "/dev/null" {
        return None;
    }
    Some(clean_prefix(path).to_string())
}

/// Split the `a/OLD b/NEW` tail of a `diff --git` line into both paths
fn split_git_paths(rest: &str) -> Option<(String, String)> {
    let rest = rest.trim_end();

    // Quoted old path, as git writes for unusual characters
    if let Some(stripped) = rest.strip_prefix('"') {
        let end = stripped.find('"')?;
        let old = &stripped[..end];
        let new = unquote(stripped.get(end + 1..)?.trim_start());
        if old.is_empty() || new.is_empty() {
            return None;
        }
        return Some((clean_prefix(old).to_string(), clean_prefix(new).to_string()));
    }

    // Unquoted paths may contain spaces; the " b/" boundary disambiguates
    if let Some(idx) = rest.rfind(" b/") {
        let old = &rest[..idx];
        let new = &rest[idx + 1..];
        if old.starts_with("a/") {
            return Some((clean_prefix(old).to_string(), clean_prefix(new).to_string()));
        }
    }

    // Plain form, e.g. diff --no-prefix output
    let (old, new) = rest.split_once(' ')?;
    if old.is_empty() || new.is_empty() {
        return None;
    }
    Some((
        clean_prefix(old).to_string(),
        clean_prefix(unquote(new)).to_string(),
    ))
}
