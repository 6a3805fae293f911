//! Merge/dedupe driver: the single pass over concatenated source lines.
//!
//! A streaming, stateful fold with no backtracking: pass-through lines
//! are copied verbatim, rule lines are excluded/parsed/normalized, and
//! the first occurrence of each unique hostname wins. Input order is
//! therefore significant and must be deterministic (base sources before
//! extensions before the blacklist).

use std::collections::HashSet;

use tracing::warn;

use crate::exclusion::ExclusionSet;
use crate::normalizer::normalize_rule;
use crate::parser::{self, ParsedLine, RuleParser};

/// Hostnames never emitted into the body; the static header entries
/// cover them.
pub const RESERVED_HOSTNAMES: &[&str] =
    &["localhost", "localhost.localdomain", "local", "broadcasthost"];

/// Options threaded through one merge pass.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// IP address substituted into every output record, verbatim.
    pub target_ip: String,
    /// Preserve trailing rule text as `#` comments.
    pub keep_domain_comments: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            target_ip: "0.0.0.0".to_string(),
            keep_domain_comments: false,
        }
    }
}

/// Result of one merge pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutput {
    /// Deduplicated body lines, each `\n`-terminated, in input order.
    pub lines: Vec<String>,
    /// Number of unique hostnames written (pass-through lines excluded).
    pub unique_count: usize,
}

/// Merge concatenated source lines into a deduplicated body.
///
/// Per input line, in order: normalize terminators and trailing
/// space/periods; copy pass-through lines verbatim; drop lines containing
/// `::1`; drop lines with fewer than two tokens; drop excluded lines;
/// parse, logging and dropping lines that fail; normalize; emit the first
/// occurrence of each hostname and count it. Nothing in here aborts the
/// pass.
pub fn merge<'a, I>(lines: I, exclusions: &ExclusionSet, options: &MergeOptions) -> MergeOutput
where
    I: IntoIterator<Item = &'a str>,
{
    let rule_parser = RuleParser::new();
    let mut seen: HashSet<String> = RESERVED_HOSTNAMES.iter().map(|h| h.to_string()).collect();
    let mut output = Vec::new();
    let mut unique_count = 0;

    for raw in lines {
        let line = parser::normalize_line(raw);

        if parser::is_pass_through(&line) {
            output.push(line);
            continue;
        }

        if line.contains("::1") {
            continue;
        }

        let Some(stripped) = parser::strip_rule(&line) else {
            continue;
        };

        if exclusions.should_exclude(&stripped, &line) {
            continue;
        }

        let rule = match rule_parser.parse(&line) {
            ParsedLine::Rule(rule) => rule,
            _ => {
                warn!("Skipping unparseable rule line: {:?}", line.trim_end());
                continue;
            }
        };

        let (hostname, rendered) =
            normalize_rule(&rule, &options.target_ip, options.keep_domain_comments);

        if seen.insert(hostname) {
            output.push(rendered);
            unique_count += 1;
        }
    }

    MergeOutput {
        lines: output,
        unique_count,
    }
}
