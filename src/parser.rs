//! Rule line parsing for hosts file sources.
//!
//! Sources are line-oriented: a line is either a pass-through line
//! (comment or blank, copied to the output unchanged), a rule line of the
//! form `<ip> <hostname> [trailing text]`, or garbage. The parser
//! classifies lines and extracts the `(ip, hostname, suffix)` triple from
//! rule lines; it performs no I/O and never fails the run.

use regex::Regex;

/// Pattern matched against a normalized line to extract a rule.
///
/// Optional leading whitespace, an IPv4 quad, whitespace, a hostname
/// (word characters, dots, hyphens), then anything left over as the
/// suffix. Octet range checking is deliberately loose: sources are
/// blocklists, not router configs, and a bogus quad still identifies
/// the line as a rule whose hostname we want.
const RULE_PATTERN: &str = r"^[ \t]*(\d+\.\d+\.\d+\.\d+)\s+([\w.-]+)(.*)";

/// A data line successfully matched against the rule pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    /// Source IP as written; replaced by the target IP on output.
    pub ip: String,
    /// Lowercased, trimmed hostname.
    pub hostname: String,
    /// Trailing text after the hostname, empty when absent.
    pub suffix: String,
}

/// Classification of one normalized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Comment or blank line, to be copied to the output verbatim.
    PassThrough,
    /// A rule line with its extracted fields.
    Rule(ParsedRule),
    /// Neither pass-through nor a valid rule; the caller logs and skips.
    Invalid,
}

/// Line classifier and rule extractor.
///
/// Holds the compiled rule pattern; create once per merge pass.
pub struct RuleParser {
    rule: Regex,
}

impl RuleParser {
    pub fn new() -> Self {
        Self {
            rule: Regex::new(RULE_PATTERN).expect("valid rule extraction regex"),
        }
    }

    /// Classify a normalized line and extract rule fields.
    ///
    /// The full line is matched, not the stripped rule, so trailing
    /// comments survive into `suffix` for optional preservation.
    pub fn parse(&self, line: &str) -> ParsedLine {
        if is_pass_through(line) {
            return ParsedLine::PassThrough;
        }

        match self.rule.captures(line) {
            Some(caps) => ParsedLine::Rule(ParsedRule {
                ip: caps[1].to_string(),
                hostname: caps[2].trim().to_lowercase(),
                suffix: caps[3].to_string(),
            }),
            None => ParsedLine::Invalid,
        }
    }
}

impl Default for RuleParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a raw source line for processing.
///
/// Tabs become spaces, trailing whitespace and trailing periods are
/// trimmed, and the line is re-terminated with a single `\n`. Line
/// terminator differences (CRLF vs LF) disappear here.
pub fn normalize_line(raw: &str) -> String {
    let mut line = raw.replace('\t', " ");
    let trimmed_len = line.trim_end_matches([' ', '.', '\r', '\n']).len();
    line.truncate(trimmed_len);
    line.push('\n');
    line
}

/// Whether a normalized line is a pass-through line: a comment, or
/// entirely whitespace.
pub fn is_pass_through(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

/// Reduce a line to its first two whitespace-separated tokens, the
/// "stripped rule" used for exclusion matching.
///
/// Returns `None` when the line has fewer than two tokens and therefore
/// cannot be a rule.
pub fn strip_rule(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    let ip = tokens.next()?;
    let hostname = tokens.next()?;
    Some(format!("{} {}", ip, hostname))
}
