//! Parse unified diff text into a side-by-side row model.
//!
//! The input is raw multi-file diff text as produced by a version-control
//! diff command; the output is a tree of files, hunks, and rows ready for
//! dual-column rendering. Context lines occupy both columns, deletion runs
//! are paired positionally against the addition runs that follow them, and
//! the shorter side of a pairing is padded with empty cells. The whole model
//! serializes to JSON with a stable shape.
//!
//! Parsing is all-or-nothing: malformed input fails the call with a
//! [`ParseError`] naming the offending file, never a partial result.
//!
//! # Examples
//!
//! ```
//! use sidediff::{Diff, FileStatus, Row};
//!
//! let text = r#"diff --git a/hello.txt b/hello.txt
//! index 83db48f..bf269f4 100644
//! --- a/hello.txt
//! +++ b/hello.txt
//! @@ -1,3 +1,3 @@
//!  Hello
//! -old line
//! +new line
//!  Goodbye
//! "#;
//!
//! let diff = Diff::parse(text).unwrap();
//! let file = &diff.files[0];
//! assert_eq!(file.path, "hello.txt");
//! assert_eq!(file.status, FileStatus::Modified);
//!
//! // The first row of every hunk is its header banner; the deleted and
//! // added line share one change row.
//! let hunk = &file.hunks[0];
//! assert!(matches!(hunk.rows[0], Row::HunkHeader { .. }));
//! let Row::Change { left, right } = &hunk.rows[2] else {
//!     panic!("expected a change row");
//! };
//! assert_eq!(left.content, "old line");
//! assert_eq!(right.content, "new line");
//! ```

use error_set::error_set;

pub mod diff;

pub use diff::{
    Cell, CellKind, ClassifyError, Diff, DiffSummary, FileDiff, FileStatus, Hunk, HunkHeader,
    RawLine, Row, align, classify, summarize,
};

error_set! {
    /// Errors from parsing diff text
    ParseError := {
        /// Input carries no recognizable file sections, or a hunk header
        /// appears outside any section
        #[display("No file sections found in diff text")]
        MalformedDiff,
        /// Section header line whose paths cannot be extracted
        #[display("Cannot extract paths from section header '{header}'")]
        MalformedFileHeader { header: String },
        /// Section with no hunks and no metadata explaining their absence
        #[display("File section '{path}' has no hunks and no explaining metadata")]
        EmptySection { path: String },
        /// `@@` line that does not parse as a hunk header
        #[display("Malformed hunk header '{header}' in '{path}'")]
        MalformedHunkHeader { path: String, header: String },
        /// Hunk body line with an unrecognized leading marker
        #[display("Unrecognized line marker '{marker}' in '{path}'")]
        UnknownLineMarker { path: String, marker: char },
        /// Hunk body ended before its declared counts were satisfied
        #[display("Hunk body in '{path}' ended before its declared counts")]
        TruncatedHunk { path: String },
        /// Hunk body carries more lines on a side than its header declares
        #[display("Hunk body in '{path}' has more lines than its header declares")]
        OverlongHunk { path: String },
    }
}
