//! Commit message parsing
//!
//! The `parsed` command turns each linear commit into a [`ParsedCommit`].
//! Parsing sits behind [`MessageParser`] so other conventions can be
//! plugged in; [`ConventionalParser`] handles `type(scope): subject`
//! headers with `Token: value` footers.

use crate::error::{Error, Result};
use crate::types::{Footer, ParsedCommit};
use regex::Regex;
use std::sync::LazyLock;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[A-Za-z][A-Za-z0-9_-]*)(?:\((?P<scope>[^()\r\n]*)\))?(?P<bang>!)?: (?P<subject>\S.*)$",
    )
    .expect("valid regex")
});

static FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>BREAKING[ -]CHANGE|[A-Za-z][A-Za-z0-9-]*)(?:: | #)(?P<value>.*)$")
        .expect("valid regex")
});

/// Turns a raw commit message into a [`ParsedCommit`]
pub trait MessageParser: Send + Sync {
    /// Parse one message; malformed input is an error, never a partial result
    fn parse(&self, message: &str) -> Result<ParsedCommit>;
}

/// Parser for Conventional Commits style messages
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalParser;

impl MessageParser for ConventionalParser {
    fn parse(&self, message: &str) -> Result<ParsedCommit> {
        let normalized = message.replace("\r\n", "\n");
        let mut lines = normalized.lines();

        let header = lines.next().unwrap_or_default().trim().to_string();
        if header.is_empty() {
            return Err(Error::CommitParse("empty commit message".to_string()));
        }

        let caps = HEADER_RE.captures(&header).ok_or_else(|| {
            Error::CommitParse(format!("header does not match `type(scope): subject`: {header:?}"))
        })?;

        let kind = caps["type"].to_string();
        let scope = caps
            .name("scope")
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        let subject = caps["subject"].trim().to_string();
        let bang = caps.name("bang").is_some();

        let mut paragraphs = split_paragraphs(lines);
        let has_footers = paragraphs.last().is_some_and(|p| is_footer_block(p));
        let footers = if has_footers {
            paragraphs
                .pop()
                .map(|block| parse_footers(&block))
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let body = if paragraphs.is_empty() {
            None
        } else {
            Some(
                paragraphs
                    .iter()
                    .map(|p| p.join("\n"))
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            )
        };

        let breaking = bang || footers.iter().any(|f| is_breaking_token(&f.token));

        Ok(ParsedCommit {
            header,
            kind,
            scope,
            subject,
            body,
            footers,
            breaking,
        })
    }
}

fn is_breaking_token(token: &str) -> bool {
    token == "BREAKING CHANGE" || token == "BREAKING-CHANGE"
}

/// Group non-blank lines into paragraphs
fn split_paragraphs<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<Vec<&'a str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// A footer block starts with a footer line; the rest are footers or indented continuations
fn is_footer_block(paragraph: &[&str]) -> bool {
    paragraph.first().is_some_and(|first| FOOTER_RE.is_match(first))
        && paragraph
            .iter()
            .all(|line| FOOTER_RE.is_match(line) || line.starts_with([' ', '\t']))
}

fn parse_footers(paragraph: &[&str]) -> Vec<Footer> {
    let mut footers: Vec<Footer> = Vec::new();

    for line in paragraph {
        if let Some(caps) = FOOTER_RE.captures(line) {
            footers.push(Footer {
                token: caps["token"].to_string(),
                value: caps["value"].trim().to_string(),
            });
        } else if let Some(last) = footers.last_mut() {
            last.value.push('\n');
            last.value.push_str(line.trim());
        }
    }
    footers
}
