use git2::{DiffFindOptions, DiffFormat, Oid, Repository, Signature};
use sidediff::{Cell, Diff, FileStatus, Hunk, Row};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Test fixture for a git repository
struct Fixture {
    dir: TempDir,
    repo: Repository,
}

impl Fixture {
    /// Create a new empty repo with deterministic config
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("Failed to init repo");

        // Deterministic config
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        Self { dir, repo }
    }

    /// Write a file to the repo
    fn write_file(&self, name: &str, content: &str) {
        self.write_bytes(name, content.as_bytes());
    }

    /// Write raw bytes (for binary fixtures)
    fn write_bytes(&self, name: &str, content: &[u8]) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Stage a file
    fn stage_file(&self, name: &str) {
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    /// Delete a file and drop it from the index
    fn remove_file(&self, name: &str) {
        fs::remove_file(self.dir.path().join(name)).unwrap();
        let mut index = self.repo.index().unwrap();
        index.remove_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    /// Create a commit and return its id
    fn commit(&self, message: &str) -> Oid {
        let sig = Signature::new(
            "Test User",
            "test@example.com",
            &git2::Time::new(1234567890, 0),
        )
        .unwrap();
        let tree_id = self.repo.index().unwrap().write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        if self.repo.head().is_ok() {
            let parent = self.repo.head().unwrap().peel_to_commit().unwrap();
            self.repo
                .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
                .unwrap()
        } else {
            self.repo
                .commit(Some("HEAD"), &sig, &sig, message, &tree, &[])
                .unwrap()
        }
    }

    /// Render the patch between two commits the way `git diff` prints it
    fn diff_between(&self, old: Oid, new: Oid) -> String {
        let old_tree = self.repo.find_commit(old).unwrap().tree().unwrap();
        let new_tree = self.repo.find_commit(new).unwrap().tree().unwrap();
        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)
            .unwrap();

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts)).unwrap();

        let mut buf = Vec::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            match line.origin() {
                '+' | '-' | ' ' => buf.push(line.origin() as u8),
                _ => {}
            }
            buf.extend_from_slice(line.content());
            true
        })
        .unwrap();
        String::from_utf8(buf).unwrap()
    }
}

fn assert_hunk_shape(hunk: &Hunk) {
    assert!(matches!(hunk.rows.first(), Some(Row::HunkHeader { .. })));

    let old_rows = hunk
        .rows
        .iter()
        .filter(|row| {
            matches!(row, Row::Context { left, .. } | Row::Change { left, .. }
                if left.line_num.is_some())
        })
        .count();
    let new_rows = hunk
        .rows
        .iter()
        .filter(|row| {
            matches!(row, Row::Context { right, .. } | Row::Change { right, .. }
                if right.line_num.is_some())
        })
        .count();
    assert_eq!(old_rows, hunk.old_count as usize);
    assert_eq!(new_rows, hunk.new_count as usize);
}

fn assert_all_hunk_shapes(diff: &Diff) {
    for file in &diff.files {
        for hunk in &file.hunks {
            assert_hunk_shape(hunk);
        }
    }
}

// =============================================================================
// Case 1: Modification Split Across Two Hunks
// =============================================================================

#[test]
fn case_01_modification_two_hunks() {
    let fixture = Fixture::new();

    // Thirty lines, then touch lines 3 and 25 so the default context
    // window cannot merge the changes into one hunk
    let initial_lines: Vec<String> = (1..=30).map(|i| format!("line {}", i)).collect();
    let initial_content = initial_lines.join("\n") + "\n";
    fixture.write_file("config.txt", &initial_content);
    fixture.stage_file("config.txt");
    let base = fixture.commit("initial");

    let modified_lines: Vec<String> = (1..=30)
        .map(|i| match i {
            3 | 25 => format!("line {} patched", i),
            _ => format!("line {}", i),
        })
        .collect();
    let modified_content = modified_lines.join("\n") + "\n";
    fixture.write_file("config.txt", &modified_content);
    fixture.stage_file("config.txt");
    let updated = fixture.commit("patch two spots");

    let text = fixture.diff_between(base, updated);
    let diff = Diff::parse(&text).unwrap();

    assert_eq!(diff.files.len(), 1);
    let file = &diff.files[0];
    assert_eq!(file.path, "config.txt");
    assert_eq!(file.status, FileStatus::Modified);
    assert_eq!(file.old_path, None);
    assert_eq!(file.hunks.len(), 2);
    assert!(file.hunks[0].old_start < file.hunks[1].old_start);
    assert_eq!(file.additions, 2);
    assert_eq!(file.deletions, 2);
    assert_eq!(file.changes, 4);

    // Each edit pairs into a single side-by-side row
    assert!(file.hunks[0].rows.iter().any(|row| matches!(
        row,
        Row::Change { left, right }
            if left.content == "line 3" && right.content == "line 3 patched"
    )));
    assert_all_hunk_shapes(&diff);
}

// =============================================================================
// Case 2: Added and Deleted Files, Including an Empty Addition
// =============================================================================

#[test]
fn case_02_added_and_deleted_files() {
    let fixture = Fixture::new();

    fixture.write_file("old.txt", "stale\nentries\n");
    fixture.stage_file("old.txt");
    let base = fixture.commit("initial");

    fixture.write_file("data/new.txt", "alpha\nbeta\ngamma\n");
    fixture.stage_file("data/new.txt");
    fixture.write_file("empty.txt", "");
    fixture.stage_file("empty.txt");
    fixture.remove_file("old.txt");
    let updated = fixture.commit("churn");

    let text = fixture.diff_between(base, updated);
    let diff = Diff::parse(&text).unwrap();

    // Deltas arrive in path order
    assert_eq!(diff.files.len(), 3);

    let added = &diff.files[0];
    assert_eq!(added.path, "data/new.txt");
    assert_eq!(added.status, FileStatus::Added);
    assert_eq!(added.additions, 3);
    assert_eq!(added.hunks.len(), 1);

    // An empty file arrives with metadata but no hunks
    let empty = &diff.files[1];
    assert_eq!(empty.path, "empty.txt");
    assert_eq!(empty.status, FileStatus::Added);
    assert!(empty.hunks.is_empty());
    assert_eq!(empty.changes, 0);

    let deleted = &diff.files[2];
    assert_eq!(deleted.path, "old.txt");
    assert_eq!(deleted.status, FileStatus::Deleted);
    assert_eq!(deleted.deletions, 2);

    let summary = diff.summary();
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.total_additions, 3);
    assert_eq!(summary.total_deletions, 2);
    assert_eq!(summary.files_by_status[&FileStatus::Added], 2);
    assert_eq!(summary.files_by_status[&FileStatus::Deleted], 1);
    assert_all_hunk_shapes(&diff);
}

// =============================================================================
// Case 3: Rename With an Edit
// =============================================================================

#[test]
fn case_03_rename_with_edit() {
    let fixture = Fixture::new();

    let original = r#"import re

def slug(value):
    value = value.strip()
    value = re.sub(r'\s+', '-', value)
    return value.lower()
"#;
    fixture.write_file("src/util.py", original);
    fixture.stage_file("src/util.py");
    let base = fixture.commit("initial");

    // Same content under a new name with one line changed, similar
    // enough for rename detection to pair the delete with the add
    let renamed = original.replace("value.lower()", "value.casefold()");
    fixture.remove_file("src/util.py");
    fixture.write_file("src/helpers.py", &renamed);
    fixture.stage_file("src/helpers.py");
    let updated = fixture.commit("rename util to helpers");

    let text = fixture.diff_between(base, updated);
    let diff = Diff::parse(&text).unwrap();

    assert_eq!(diff.files.len(), 1);
    let file = &diff.files[0];
    assert_eq!(file.path, "src/helpers.py");
    assert_eq!(file.old_path.as_deref(), Some("src/util.py"));
    assert_eq!(file.status, FileStatus::Renamed);
    assert_eq!(file.additions, 1);
    assert_eq!(file.deletions, 1);
    assert_eq!(file.hunks.len(), 1);
    assert_all_hunk_shapes(&diff);
}

// =============================================================================
// Case 4: Pure Rename
// =============================================================================

#[test]
fn case_04_pure_rename() {
    let fixture = Fixture::new();

    let content = "one\ntwo\nthree\nfour\n";
    fixture.write_file("docs/a.md", content);
    fixture.stage_file("docs/a.md");
    let base = fixture.commit("initial");

    fixture.remove_file("docs/a.md");
    fixture.write_file("docs/b.md", content);
    fixture.stage_file("docs/b.md");
    let updated = fixture.commit("move without edits");

    let text = fixture.diff_between(base, updated);
    let diff = Diff::parse(&text).unwrap();

    // A 100% rename carries only metadata, never hunks
    assert_eq!(diff.files.len(), 1);
    let file = &diff.files[0];
    assert_eq!(file.path, "docs/b.md");
    assert_eq!(file.old_path.as_deref(), Some("docs/a.md"));
    assert_eq!(file.status, FileStatus::Renamed);
    assert!(file.hunks.is_empty());
    assert_eq!(file.changes, 0);
}

// =============================================================================
// Case 5: Binary Change
// =============================================================================

#[test]
fn case_05_binary_change() {
    let fixture = Fixture::new();

    fixture.write_bytes("logo.bin", b"\x89BIN\x00\x01\x02\x03old payload\x00");
    fixture.stage_file("logo.bin");
    let base = fixture.commit("initial");

    fixture.write_bytes("logo.bin", b"\x89BIN\x00\x01\x02\x03new payload\x00");
    fixture.stage_file("logo.bin");
    let updated = fixture.commit("swap payload");

    let text = fixture.diff_between(base, updated);
    let diff = Diff::parse(&text).unwrap();

    assert_eq!(diff.files.len(), 1);
    let file = &diff.files[0];
    assert_eq!(file.path, "logo.bin");
    assert_eq!(file.status, FileStatus::Modified);
    assert!(file.hunks.is_empty());
    assert_eq!(file.changes, 0);
}

// =============================================================================
// Case 6: Missing Trailing Newline
// =============================================================================

#[test]
fn case_06_no_trailing_newline() {
    let fixture = Fixture::new();

    fixture.write_file("notes.txt", "alpha\nomega");
    fixture.stage_file("notes.txt");
    let base = fixture.commit("initial");

    fixture.write_file("notes.txt", "alpha\nomega rides again");
    fixture.stage_file("notes.txt");
    let updated = fixture.commit("extend last line");

    let text = fixture.diff_between(base, updated);
    assert!(text.contains("\\ No newline at end of file"));

    let diff = Diff::parse(&text).unwrap();
    let hunk = &diff.files[0].hunks[0];

    // The marker lines vanish instead of becoming rows
    assert_eq!(hunk.rows.len(), 3);
    assert_eq!(
        hunk.rows[2],
        Row::Change {
            left: Cell::deletion(2, "omega"),
            right: Cell::addition(2, "omega rides again"),
        }
    );
    assert_all_hunk_shapes(&diff);
}
