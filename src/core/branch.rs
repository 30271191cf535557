//! core::branch
//!
//! Merge-line grammar and branch-name pattern.
//!
//! # Merge lines
//!
//! `git log --oneline` prints `<hash> <subject>`. A merge of interest has a
//! subject shaped like
//!
//! ```text
//! Merge pull request #17 in PROJ/repo from fix/issues/42_typo to master
//! ```
//!
//! [`MergeLineParser`] extracts the source branch (`fix/issues/42_typo`)
//! from that shape and reports a typed [`MergeLineError`] when the line does
//! not fit, instead of slicing out whatever lies between two markers.
//!
//! # Branch names
//!
//! Branches follow `{fix|bug|feature}/[issues/]<id>[-_]<description>`.
//! [`parse_branch_name`] turns a conforming name into a [`BranchNameMatch`];
//! anything else is `None` and is simply not part of the changelog.
//!
//! # Example
//!
//! ```
//! use merge_changelog::core::branch::{parse_branch_name, ChangeKind, MergeLineParser};
//!
//! let parser = MergeLineParser::new("to master");
//! let branch = parser
//!     .extract_source_branch("1a2b3c4 Merge pull request #9 in X/y from feature/123 to master")
//!     .unwrap();
//! assert_eq!(branch, "feature/123");
//!
//! let m = parse_branch_name(branch).unwrap();
//! assert_eq!(m.change_kind, ChangeKind::Feature);
//! assert_eq!(m.issue_id.as_str(), "123");
//! assert!(!m.is_regression());
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Branch naming convention linking a branch to an issue.
pub const BRANCH_PATTERN: &str = r"^(fix|bug|feature)(/issues)?/([0-9]+)[_-]?(.*)$";

static BRANCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BRANCH_PATTERN).expect("branch pattern is a valid regex"));

/// Errors from merge-line extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MergeLineError {
    /// The line has no ` from <branch> <marker>` segment.
    #[error("no source branch in merge line: {line}")]
    NoSourceBranch {
        /// The offending log line
        line: String,
    },
}

/// Kind of change a branch carries, from its first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Feature,
    Bug,
    Fix,
}

impl ChangeKind {
    /// Map the captured prefix. Unknown prefixes fall back to [`ChangeKind::Fix`].
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "feature" => ChangeKind::Feature,
            "bug" => ChangeKind::Bug,
            _ => ChangeKind::Fix,
        }
    }

    /// Changelog category for this kind.
    pub fn category(self) -> Category {
        match self {
            ChangeKind::Feature => Category::Feature,
            ChangeKind::Bug | ChangeKind::Fix => Category::Fix,
        }
    }
}

/// Category label rendered in a changelog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Feature,
    Fix,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Feature => write!(f, "Feature"),
            Category::Fix => write!(f, "Fix"),
        }
    }
}

/// A numeric issue identifier, kept as the digits found in the branch name.
///
/// Stored as text so very long ids are passed through to the tracker
/// untouched rather than overflowing an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueId(String);

impl IssueId {
    /// Accept only non-empty, all-ASCII-digit strings.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields derived from a conforming branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNameMatch {
    pub change_kind: ChangeKind,
    /// Whether the optional `/issues` segment was present
    pub issues_segment: bool,
    pub issue_id: IssueId,
    /// Text after the id and its optional `-`/`_` separator
    pub description: String,
}

impl BranchNameMatch {
    /// A trailing description marks the entry as a regression fix.
    pub fn is_regression(&self) -> bool {
        !self.description.is_empty()
    }
}

/// Match a branch name against [`BRANCH_PATTERN`].
///
/// Returns `None` when the name does not conform or the id is not purely
/// numeric.
pub fn parse_branch_name(branch: &str) -> Option<BranchNameMatch> {
    let caps = BRANCH_RE.captures(branch)?;

    let issue_id = IssueId::new(caps.get(3)?.as_str())?;

    Some(BranchNameMatch {
        change_kind: ChangeKind::from_prefix(&caps[1]),
        issues_segment: caps.get(2).is_some(),
        issue_id,
        description: caps.get(4).map_or("", |m| m.as_str()).to_string(),
    })
}

/// Extracts source branches from one-line merge summaries.
#[derive(Debug, Clone)]
pub struct MergeLineParser {
    re: Regex,
}

impl MergeLineParser {
    /// Build a parser for merges whose subject ends in ` from <branch> <marker>`.
    pub fn new(marker: &str) -> Self {
        let pattern = format!(
            r"^\S+\s.*? from (\S+) {}(?:\s|$)",
            regex::escape(marker.trim())
        );
        // The only dynamic part is escaped, so the pattern always compiles.
        let re = Regex::new(&pattern).expect("merge line pattern is a valid regex");
        Self { re }
    }

    /// Source branch named by a merge line.
    pub fn extract_source_branch<'a>(&self, line: &'a str) -> Result<&'a str, MergeLineError> {
        self.re
            .captures(line.trim_end())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| MergeLineError::NoSourceBranch {
                line: line.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_branch_name {
        use super::*;

        #[test]
        fn fix_with_issues_segment_and_description() {
            let m = parse_branch_name("fix/issues/42_typo").unwrap();
            assert_eq!(m.change_kind, ChangeKind::Fix);
            assert!(m.issues_segment);
            assert_eq!(m.issue_id.as_str(), "42");
            assert_eq!(m.description, "typo");
            assert!(m.is_regression());
        }

        #[test]
        fn feature_without_description() {
            let m = parse_branch_name("feature/123").unwrap();
            assert_eq!(m.change_kind, ChangeKind::Feature);
            assert!(!m.issues_segment);
            assert_eq!(m.issue_id.as_str(), "123");
            assert_eq!(m.description, "");
            assert!(!m.is_regression());
        }

        #[test]
        fn bug_maps_to_fix_category() {
            let m = parse_branch_name("bug/7-crash-on-start").unwrap();
            assert_eq!(m.change_kind, ChangeKind::Bug);
            assert_eq!(m.change_kind.category(), Category::Fix);
            assert_eq!(m.description, "crash-on-start");
        }

        #[test]
        fn separator_is_optional() {
            let m = parse_branch_name("fix/15abc").unwrap();
            assert_eq!(m.issue_id.as_str(), "15");
            assert_eq!(m.description, "abc");
        }

        #[test]
        fn lone_separator_is_not_a_description() {
            let m = parse_branch_name("fix/15_").unwrap();
            assert_eq!(m.description, "");
            assert!(!m.is_regression());
        }

        #[test]
        fn non_numeric_id_is_rejected() {
            assert!(parse_branch_name("fix/abc/oops").is_none());
            assert!(parse_branch_name("feature/issues/x12").is_none());
        }

        #[test]
        fn unknown_prefix_is_rejected() {
            assert!(parse_branch_name("chore/12").is_none());
            assert!(parse_branch_name("release/1.2").is_none());
            assert!(parse_branch_name("bugfix/12").is_none());
        }

        #[test]
        fn empty_is_rejected() {
            assert!(parse_branch_name("").is_none());
        }
    }

    mod change_kind {
        use super::*;

        #[test]
        fn unrecognized_prefix_defaults_to_fix() {
            assert_eq!(ChangeKind::from_prefix("hotfix"), ChangeKind::Fix);
            assert_eq!(ChangeKind::from_prefix("hotfix").category(), Category::Fix);
        }

        #[test]
        fn category_labels() {
            assert_eq!(Category::Feature.to_string(), "Feature");
            assert_eq!(Category::Fix.to_string(), "Fix");
        }
    }

    mod issue_id {
        use super::*;

        #[test]
        fn digits_only() {
            assert!(IssueId::new("0042").is_some());
            assert!(IssueId::new("").is_none());
            assert!(IssueId::new("4 2").is_none());
            assert!(IssueId::new("٤٢").is_none());
        }
    }

    mod merge_line_parser {
        use super::*;

        fn parser() -> MergeLineParser {
            MergeLineParser::new("to master")
        }

        #[test]
        fn extracts_pull_request_merge() {
            let line = "a1b2c3d Merge pull request #17 in ADGUARD/ext from fix/issues/42_typo to master";
            assert_eq!(
                parser().extract_source_branch(line).unwrap(),
                "fix/issues/42_typo"
            );
        }

        #[test]
        fn tolerates_trailing_text_and_newline() {
            let line = "a1b2c3d Merge from feature/9 to master (squashed)\n";
            assert_eq!(parser().extract_source_branch(line).unwrap(), "feature/9");
        }

        #[test]
        fn missing_from_is_an_error() {
            let line = "a1b2c3d Merge feature/9 to master";
            assert_eq!(
                parser().extract_source_branch(line).unwrap_err(),
                MergeLineError::NoSourceBranch {
                    line: line.to_string()
                }
            );
        }

        #[test]
        fn missing_marker_is_an_error() {
            let line = "a1b2c3d Merge pull request #3 from feature/9 to main";
            assert!(parser().extract_source_branch(line).is_err());
        }

        #[test]
        fn marker_must_end_at_word_boundary() {
            let line = "a1b2c3d Merge from feature/9 to mastery";
            assert!(parser().extract_source_branch(line).is_err());
        }

        #[test]
        fn custom_marker_is_escaped() {
            let parser = MergeLineParser::new("into release (1.x)");
            let line = "a1b2c3d Merge from fix/4 into release (1.x)";
            assert_eq!(parser.extract_source_branch(line).unwrap(), "fix/4");
        }
    }
}
