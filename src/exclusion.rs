//! Exclusion rules applied during the merge pass.
//!
//! Two kinds of exclusions with deliberately different matching targets:
//! whitelist entries are literal substrings tested against the full raw
//! line, while user-chosen domains compile to suffix patterns tested
//! against the hostname extracted from the stripped rule, before
//! normalization. A literal can therefore remove a line based on text
//! that only appears in its trailing comment.

use regex::Regex;

use crate::error::UnihostsError;

/// Prefix allowing any chain of subdomain labels before an excluded
/// domain, so excluding `example.com` also drops `ads.example.com`.
const EXCLUSION_PATTERN: &str = r"([a-zA-Z\d-]+\.){0,}";

/// The set of exclusion rules for one merge pass. Built once from the
/// whitelist file and the configured exclusion domains, then immutable.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    literals: Vec<String>,
    patterns: Vec<Regex>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set whose literals are the given whitelist lines.
    pub fn from_whitelist<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for line in lines {
            set.add_literal(line);
        }
        set
    }

    /// Add a literal substring exclusion, matched anywhere in the raw line.
    pub fn add_literal<S: Into<String>>(&mut self, literal: S) {
        self.literals.push(literal.into());
    }

    /// Add a domain exclusion, compiled to a subdomain-tolerant pattern
    /// matched against extracted hostnames.
    pub fn exclude_domain(&mut self, domain: &str) -> Result<(), UnihostsError> {
        let pattern = format!("{}{}", EXCLUSION_PATTERN, regex::escape(domain));
        let compiled = Regex::new(&pattern).map_err(|source| UnihostsError::Pattern {
            pattern,
            source,
        })?;
        self.patterns.push(compiled);
        Ok(())
    }

    /// Number of exclusion rules (literals plus patterns).
    pub fn len(&self) -> usize {
        self.literals.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.patterns.is_empty()
    }

    /// Decide whether a line must be dropped.
    ///
    /// `stripped_rule` is the two-token form produced by
    /// [`crate::parser::strip_rule`]; `full_line` is the normalized line
    /// it came from. Pattern matching runs on the stripped rule's second
    /// token, literal matching on the full line.
    pub fn should_exclude(&self, stripped_rule: &str, full_line: &str) -> bool {
        if let Some(hostname) = stripped_rule.split_whitespace().nth(1) {
            if self.patterns.iter().any(|re| re.is_match(hostname)) {
                return true;
            }
        }
        self.literals.iter().any(|lit| full_line.contains(lit.as_str()))
    }
}

/// Validate a domain entered for exclusion.
///
/// Rejects empty input and inputs that look like URLs or already carry a
/// `www.` prefix; exclusions operate on bare domains.
pub fn is_valid_domain_format(domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    let url_like = Regex::new(r"^(www\d{0,3}[.]|https?)").expect("valid domain format regex");
    !url_like.is_match(domain)
}
