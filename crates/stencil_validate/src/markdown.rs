//! Minimal markdown structure checks.
//!
//! This is a sanity check, not a grammar: content must be non-blank,
//! contain at least one ATX heading (`#` to `######`, a space, then text),
//! and close every fenced code block it opens. Headings inside a fenced
//! block do not count.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").expect("heading pattern is valid"));

const FENCE: &str = "```";

/// Why a block of text is not acceptable markdown.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownIssue {
    #[error("Content is empty")]
    Empty,

    #[error("No markdown heading found")]
    MissingHeading,

    #[error("Unbalanced code fence")]
    UnbalancedFence,
}

/// Decides whether text qualifies as minimally well-formed markdown.
pub trait MarkdownValidator: Send + Sync {
    fn check_markdown(&self, text: &str) -> Result<(), MarkdownIssue>;

    fn is_valid_markdown(&self, text: &str) -> bool {
        self.check_markdown(text).is_ok()
    }
}

/// The standard heading and fence rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMarkdownValidator;

impl MarkdownValidator for StandardMarkdownValidator {
    fn check_markdown(&self, text: &str) -> Result<(), MarkdownIssue> {
        if text.trim().is_empty() {
            return Err(MarkdownIssue::Empty);
        }

        let mut in_fence = false;
        let mut has_heading = false;

        for line in text.lines() {
            if is_fence(line) {
                in_fence = !in_fence;
            } else if !in_fence && parse_heading(line).is_some() {
                has_heading = true;
            }
        }

        if in_fence {
            return Err(MarkdownIssue::UnbalancedFence);
        }
        if !has_heading {
            return Err(MarkdownIssue::MissingHeading);
        }
        Ok(())
    }
}

/// A parsed ATX heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of leading `#` characters (1 to 6).
    pub level: usize,
    pub title: String,
}

/// Parse a heading line such as `## Usage`.
///
/// `#NoSpace` and runs of more than six `#` are not headings.
pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = HEADING.captures(line)?;
    Some(Heading {
        level: caps[1].len(),
        title: caps[2].trim_end().to_string(),
    })
}

/// Whether a line opens or closes a fenced code block.
pub fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}
