//! engine::pipeline
//!
//! The changelog run, stage by stage.
//!
//! [`classify_lines`] and [`build_changelog`] are usable on their own with
//! any [`IssueTracker`]; [`generate`] wires them to the repository and the
//! output file.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use thiserror::Error;

use super::Context;
use crate::core::branch::{parse_branch_name, BranchNameMatch, MergeLineError, MergeLineParser};
use crate::core::config::Config;
use crate::core::entry::{ChangelogDocument, ChangelogEntry};
use crate::git::Git;
use crate::tracker::{IssueTracker, TrackerError};
use crate::ui::output::{self, Verbosity};

/// Errors that stop a run after configuration has been accepted.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A log line did not fit the merge grammar and strict mode is on.
    #[error("malformed merge line: {0}")]
    Grammar(#[from] MergeLineError),

    /// An issue lookup failed.
    #[error("failed to fetch issue #{id} from {tracker}")]
    Fetch {
        id: String,
        tracker: &'static str,
        #[source]
        source: TrackerError,
    },
}

/// A merge line whose source branch names an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeMatch {
    /// The log line as printed by git
    pub line: String,
    pub branch: String,
    pub matched: BranchNameMatch,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Lines returned by the history query
    pub lines: usize,
    /// Lines that produced a lookup
    pub matched: usize,
    /// Lines whose branch does not follow the naming pattern
    pub skipped_pattern: usize,
    /// Lines outside the merge-message grammar
    pub skipped_grammar: usize,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} line(s): {} matched, {} skipped by branch pattern, {} skipped by merge grammar",
            self.lines, self.matched, self.skipped_pattern, self.skipped_grammar
        )
    }
}

/// Log lines split into lookups and skips.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// Lines to look up, in log order
    pub matches: Vec<MergeMatch>,
    /// Lines outside the merge grammar (only populated when not strict)
    pub grammar_misses: Vec<MergeLineError>,
    pub stats: RunStats,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub document: ChangelogDocument,
    pub stats: RunStats,
    /// Where the document was written
    pub output: PathBuf,
}

/// Sort log lines into issue lookups and skips.
///
/// A branch that does not follow the naming pattern is skipped. A line
/// outside the merge grammar is skipped too, unless `strict` is set, in
/// which case the first such line is returned as an error.
pub fn classify_lines(
    lines: &[String],
    parser: &MergeLineParser,
    strict: bool,
) -> Result<Classified, PipelineError> {
    let mut classified = Classified {
        stats: RunStats {
            lines: lines.len(),
            ..RunStats::default()
        },
        ..Classified::default()
    };

    for line in lines {
        let branch = match parser.extract_source_branch(line) {
            Ok(branch) => branch,
            Err(e) if strict => return Err(e.into()),
            Err(e) => {
                tracing::debug!(%line, "skipping line outside merge grammar");
                classified.stats.skipped_grammar += 1;
                classified.grammar_misses.push(e);
                continue;
            }
        };

        match parse_branch_name(branch) {
            Some(matched) => {
                classified.stats.matched += 1;
                classified.matches.push(MergeMatch {
                    line: line.clone(),
                    branch: branch.to_string(),
                    matched,
                });
            }
            None => {
                tracing::debug!(%branch, "skipping branch outside naming pattern");
                classified.stats.skipped_pattern += 1;
            }
        }
    }

    Ok(classified)
}

/// Look up every match, one request at a time, and build the document.
///
/// The first failed lookup aborts the whole build.
pub async fn build_changelog(
    matches: &[MergeMatch],
    tracker: &dyn IssueTracker,
    verbosity: Verbosity,
) -> Result<ChangelogDocument, PipelineError> {
    let mut entries = Vec::with_capacity(matches.len());

    for m in matches {
        output::print(&m.line, verbosity);

        let issue = tracker
            .get_issue(&m.matched.issue_id)
            .await
            .map_err(|source| PipelineError::Fetch {
                id: m.matched.issue_id.to_string(),
                tracker: tracker.name(),
                source,
            })?;

        let entry = ChangelogEntry::for_issue(&m.matched, &issue.title, issue.number);
        output::debug(entry.as_str().trim_end(), verbosity);
        entries.push(entry);
    }

    Ok(ChangelogDocument::new(entries))
}

/// Run the whole pipeline for `config` and write the output file.
///
/// This is a synchronous wrapper that uses tokio to run the lookups.
/// Relative output paths resolve against the context's working directory.
pub fn generate(ctx: &Context, config: &Config, tracker: &dyn IssueTracker) -> Result<RunReport> {
    let verbosity = ctx.verbosity();
    let cwd = match &ctx.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let git = Git::open(&cwd).context("Failed to open repository")?;
    let lines = git
        .merge_log(config.marker(), config.after_date())
        .context("Failed to read merge history")?;
    tracing::debug!(count = lines.len(), "history lines");

    let parser = MergeLineParser::new(config.marker());
    let classified = classify_lines(&lines, &parser, config.strict())?;
    for miss in &classified.grammar_misses {
        output::warn(miss, verbosity);
    }

    let rt = tokio::runtime::Runtime::new()?;
    let document = rt.block_on(build_changelog(&classified.matches, tracker, verbosity))?;

    let output_path = cwd.join(config.output());
    document
        .write_to(&output_path)
        .with_context(|| format!("Failed to write changelog to {}", output_path.display()))?;

    output::print_raw(&document.render(), verbosity);

    let stats = classified.stats;
    tracing::info!(
        lines = stats.lines,
        matched = stats.matched,
        skipped_pattern = stats.skipped_pattern,
        skipped_grammar = stats.skipped_grammar,
        "changelog written"
    );
    output::debug(stats, verbosity);

    Ok(RunReport {
        document,
        stats,
        output: output_path,
    })
}
