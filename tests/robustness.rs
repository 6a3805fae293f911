//! Robustness tests for edge cases and error conditions.
//!
//! These tests verify that the merge pipeline handles hostile and
//! malformed input gracefully.

use unihosts::exclusion::ExclusionSet;
use unihosts::merge::{merge, MergeOptions};
use unihosts::parser::{normalize_line, strip_rule, ParsedLine, RuleParser};

fn run(input: &str) -> unihosts::merge::MergeOutput {
    merge(input.lines(), &ExclusionSet::new(), &MergeOptions::default())
}

/// Unparseable lines never abort the pass
#[test]
fn test_garbage_lines_are_skipped() {
    let input = "ovenmitt\n\u{0}\u{1}\u{2}\nnot a rule at all\n0.0.0.0 good.example.com\n";
    let out = run(input);
    assert_eq!(out.lines, vec!["0.0.0.0 good.example.com\n"]);
    assert_eq!(out.unique_count, 1);
}

/// A source that is one enormous line without a terminator
#[test]
fn test_unterminated_long_line() {
    let host = "a".repeat(10_000);
    let input = format!("0.0.0.0 {}.example.com", host);
    let out = run(&input);
    assert_eq!(out.unique_count, 1);
    assert!(out.lines[0].ends_with(".example.com\n"));
}

/// Mixed line endings across concatenated sources
#[test]
fn test_mixed_line_endings() {
    let input = "0.0.0.0 a.example.com\r\n0.0.0.0 b.example.com\n0.0.0.0 c.example.com";
    let out = run(input);
    assert_eq!(out.unique_count, 3);
    for line in &out.lines {
        assert!(!line.contains('\r'));
        assert!(line.ends_with('\n'));
    }
}

/// Two sources concatenated without a trailing newline form one line;
/// the merge pass must not panic and must treat it as a single record
#[test]
fn test_concatenation_seam() {
    let input = "0.0.0.0 a.example.com0.0.0.0 b.example.com";
    let out = run(input);
    // One line, one rule: the glued hostname wins as-is
    assert_eq!(out.unique_count, 1);
}

/// Unicode in hostnames does not match the ASCII-ish rule pattern class
/// boundaries badly; the pass either accepts or skips, never panics
#[test]
fn test_unicode_input_no_panic() {
    let input = "0.0.0.0 bücher.example\n0.0.0.0 good.example.com\n# héllo\n";
    let out = run(input);
    assert!(out.lines.iter().any(|l| l.contains("good.example.com")));
    assert!(out.lines.iter().any(|l| l.starts_with("# héllo")));
}

/// An empty exclusion set excludes nothing, a populated one never panics
/// on weird stripped rules
#[test]
fn test_exclusion_on_malformed_rules() {
    let mut exclusions = ExclusionSet::new();
    exclusions.exclude_domain("example.com").unwrap();
    assert!(!exclusions.should_exclude("", ""));
    assert!(!exclusions.should_exclude("one-token", "one-token\n"));
}

/// Regex metacharacters in excluded domains are treated literally
#[test]
fn test_exclusion_domain_with_metacharacters() {
    let mut exclusions = ExclusionSet::new();
    exclusions.exclude_domain("a+b.example.com").unwrap();
    assert!(exclusions.should_exclude("0.0.0.0 a+b.example.com", "0.0.0.0 a+b.example.com\n"));
    assert!(!exclusions.should_exclude("0.0.0.0 aab.example.com", "0.0.0.0 aab.example.com\n"));
}

/// The ::1 drop never removes pass-through comments
#[test]
fn test_ipv6_drop_spares_comments() {
    let out = run("# see ::1 for loopback\n::1 localhost\n");
    assert_eq!(out.lines, vec!["# see ::1 for loopback\n"]);
    assert_eq!(out.unique_count, 0);
}

/// Whitespace-heavy rule lines still parse
#[test]
fn test_whitespace_heavy_rules() {
    let out = run("   0.0.0.0\t\tpadded.example.com   \n");
    assert_eq!(out.lines, vec!["0.0.0.0 padded.example.com\n"]);
}

/// The parser never panics on pathological fragments
#[test]
fn test_parser_pathological_fragments() {
    let parser = RuleParser::new();
    for fragment in ["", ".", "...", "0.0.0.0", "0.0.0.0 ", "# ", " #", "\u{7f}"] {
        let line = normalize_line(fragment);
        let _ = parser.parse(&line);
        let _ = strip_rule(&line);
    }
}

/// Double-checking the pass-through/invalid distinction on fragments
#[test]
fn test_classification_of_fragments() {
    let parser = RuleParser::new();
    assert_eq!(parser.parse(&normalize_line("# c")), ParsedLine::PassThrough);
    assert_eq!(parser.parse(&normalize_line("   ")), ParsedLine::PassThrough);
    assert_eq!(parser.parse(&normalize_line("junk")), ParsedLine::Invalid);
}

/// Huge duplicate volume collapses to one record
#[test]
fn test_many_duplicates() {
    let input = "0.0.0.0 dup.example.com\n".repeat(5_000);
    let out = run(&input);
    assert_eq!(out.unique_count, 1);
    assert_eq!(out.lines.len(), 1);
}
