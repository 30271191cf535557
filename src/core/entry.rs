//! core::entry
//!
//! Changelog entries and the output document.
//!
//! # Format
//!
//! Each entry is one CRLF-terminated line:
//!
//! ```text
//! * [Fix(regression)] Typo in settings page: #42
//! * [Feature] Dark mode: #123
//! ```
//!
//! The category and the optional `(regression)` suffix are concatenated
//! inside the brackets with nothing between them.
//!
//! # Ordering
//!
//! A [`ChangelogDocument`] keeps its entries sorted by the full rendered
//! text (byte-wise, case-sensitive), never by issue number or merge order.
//! The same entries therefore always render to the same bytes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::branch::{BranchNameMatch, Category};

/// Line terminator for every entry.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Suffix appended to the category of regression fixes.
pub const REGRESSION_TAG: &str = "(regression)";

/// Errors from writing the changelog file.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output path exists but is not a regular file.
    #[error("output path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    #[error("failed to remove existing output '{path}'")]
    Remove { path: PathBuf, source: io::Error },

    #[error("failed to write output '{path}'")]
    Write { path: PathBuf, source: io::Error },
}

/// One formatted changelog line, terminator included.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChangelogEntry(String);

impl ChangelogEntry {
    /// Render an entry from its parts.
    pub fn new(category: Category, regression: bool, title: &str, number: u64) -> Self {
        let tag = if regression { REGRESSION_TAG } else { "" };
        Self(format!(
            "* [{}{}] {}: #{}{}",
            category, tag, title, number, LINE_TERMINATOR
        ))
    }

    /// Render an entry for a matched branch and the issue it points at.
    pub fn for_issue(matched: &BranchNameMatch, title: &str, number: u64) -> Self {
        Self::new(
            matched.change_kind.category(),
            matched.is_regression(),
            title,
            number,
        )
    }

    /// Full line text, including [`LINE_TERMINATOR`].
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sorted collection of entries, written once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogDocument {
    entries: Vec<ChangelogEntry>,
}

impl ChangelogDocument {
    /// Build a document, sorting entries by their rendered text.
    pub fn new(mut entries: Vec<ChangelogEntry>) -> Self {
        entries.sort();
        Self { entries }
    }

    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenate entries; each already ends with its own terminator.
    pub fn render(&self) -> String {
        self.entries.iter().map(ChangelogEntry::as_str).collect()
    }

    /// Replace whatever is at `path` with the rendered document (UTF-8).
    ///
    /// An existing regular file (or symlink) is removed first, so the result
    /// never contains earlier content. Parent directories are not created.
    pub fn write_to(&self, path: &Path) -> Result<(), OutputError> {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_file() || meta.file_type().is_symlink() => {
                fs::remove_file(path).map_err(|source| OutputError::Remove {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
            Ok(_) => {
                return Err(OutputError::NotAFile {
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(OutputError::Write {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }

        fs::write(path, self.render()).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::branch::parse_branch_name;

    mod entry {
        use super::*;

        #[test]
        fn regression_fix_format() {
            let m = parse_branch_name("fix/issues/42_typo").unwrap();
            let entry = ChangelogEntry::for_issue(&m, "Typo in settings", 42);
            assert_eq!(entry.as_str(), "* [Fix(regression)] Typo in settings: #42\r\n");
        }

        #[test]
        fn feature_format() {
            let m = parse_branch_name("feature/123").unwrap();
            let entry = ChangelogEntry::for_issue(&m, "Dark mode", 123);
            assert_eq!(entry.as_str(), "* [Feature] Dark mode: #123\r\n");
        }

        #[test]
        fn title_is_rendered_verbatim() {
            let entry = ChangelogEntry::new(Category::Fix, false, "Ünïcode: [brackets] & more", 7);
            assert_eq!(entry.as_str(), "* [Fix] Ünïcode: [brackets] & more: #7\r\n");
        }
    }

    mod document {
        use super::*;

        #[test]
        fn sorts_by_text_not_number() {
            let doc = ChangelogDocument::new(vec![
                ChangelogEntry::new(Category::Fix, false, "Crash", 45),
                ChangelogEntry::new(Category::Feature, false, "Sync", 123),
            ]);
            assert_eq!(
                doc.render(),
                "* [Feature] Sync: #123\r\n* [Fix] Crash: #45\r\n"
            );
        }

        #[test]
        fn sort_is_case_sensitive() {
            let doc = ChangelogDocument::new(vec![
                ChangelogEntry::new(Category::Fix, false, "apple", 1),
                ChangelogEntry::new(Category::Fix, false, "Zebra", 2),
            ]);
            assert_eq!(doc.entries()[0].as_str(), "* [Fix] Zebra: #2\r\n");
        }

        #[test]
        fn regression_sorts_before_plain_category() {
            let doc = ChangelogDocument::new(vec![
                ChangelogEntry::new(Category::Fix, true, "A", 1),
                ChangelogEntry::new(Category::Fix, false, "B", 2),
            ]);
            // '(' sorts before ']'
            assert_eq!(doc.entries()[0].as_str(), "* [Fix(regression)] A: #1\r\n");
        }

        #[test]
        fn empty_document_renders_empty() {
            let doc = ChangelogDocument::default();
            assert!(doc.is_empty());
            assert_eq!(doc.render(), "");
        }
    }

    mod write_to {
        use super::*;
        use tempfile::TempDir;

        fn doc() -> ChangelogDocument {
            ChangelogDocument::new(vec![ChangelogEntry::new(Category::Fix, false, "Crash", 45)])
        }

        #[test]
        fn creates_new_file() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("CHANGELOG.txt");
            doc().write_to(&path).unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), "* [Fix] Crash: #45\r\n");
        }

        #[test]
        fn replaces_existing_file() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("CHANGELOG.txt");
            fs::write(&path, "old content that is much longer than the new one\n").unwrap();
            doc().write_to(&path).unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), "* [Fix] Crash: #45\r\n");
        }

        #[test]
        fn writing_twice_is_byte_identical() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("CHANGELOG.txt");
            doc().write_to(&path).unwrap();
            let first = fs::read(&path).unwrap();
            doc().write_to(&path).unwrap();
            assert_eq!(first, fs::read(&path).unwrap());
        }

        #[test]
        fn directory_is_rejected() {
            let dir = TempDir::new().unwrap();
            let err = doc().write_to(dir.path()).unwrap_err();
            assert!(matches!(err, OutputError::NotAFile { .. }));
        }

        #[test]
        fn missing_parent_is_an_error() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("no-such-dir").join("out.txt");
            assert!(matches!(
                doc().write_to(&path).unwrap_err(),
                OutputError::Write { .. }
            ));
        }
    }
}
