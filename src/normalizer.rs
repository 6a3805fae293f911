//! Canonical output line rendering.
//!
//! Pure function from a parsed rule to the `(hostname, output_line)` pair
//! the merge driver deduplicates on and emits. The target IP is an opaque
//! string substituted verbatim; validating it is the caller's problem.

use crate::parser::ParsedRule;

/// Render a parsed rule as a canonical output line.
///
/// The hostname is lowercased and trimmed; the rule's own IP is discarded
/// in favor of `target_ip`. When `keep_comments` is set and the rule
/// carried trailing text, that text is preserved as a `#` comment.
pub fn normalize_rule(
    rule: &ParsedRule,
    target_ip: &str,
    keep_comments: bool,
) -> (String, String) {
    let hostname = rule.hostname.trim().to_lowercase();
    let line = if keep_comments && !rule.suffix.is_empty() {
        format!("{} {} #{}\n", target_ip, hostname, rule.suffix)
    } else {
        format!("{} {}\n", target_ip, hostname)
    };
    (hostname, line)
}
