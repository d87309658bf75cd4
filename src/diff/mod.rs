pub(crate) mod cursor;
pub mod file;
pub mod full;
pub mod hunk;
pub mod line;
pub mod row;
pub mod summary;

pub use file::{FileDiff, FileStatus};
pub use full::Diff;
pub use hunk::{Hunk, HunkHeader};
pub use line::{ClassifyError, RawLine, classify};
pub use row::{Cell, CellKind, Row, align};
pub use summary::{DiffSummary, summarize};
