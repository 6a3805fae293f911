//! Final artifact assembly: banner, static entries, preamble, body.
//!
//! Rendering is a pure function of [`HeaderMeta`]; the generation date
//! and machine hostname are supplied by the caller so output is
//! reproducible under test.

use crate::utils::format_count_with_separator;

/// Where the generated file is published from.
const RAW_FILE_URL_BASE: &str = "https://raw.githubusercontent.com/unihosts/unihosts/master/";
const PROJECT_URL: &str = env!("CARGO_PKG_REPOSITORY");

/// Static records always present unless explicitly skipped.
const STATIC_ENTRIES: &[&str] = &[
    "127.0.0.1 localhost",
    "127.0.0.1 localhost.localdomain",
    "127.0.0.1 local",
    "255.255.255.255 broadcasthost",
    "::1 localhost",
    "fe80::1%lo0 localhost",
    "0.0.0.0 0.0.0.0",
];

/// Everything the banner and footer depend on.
#[derive(Debug, Clone, Default)]
pub struct HeaderMeta {
    /// Generation date, already formatted (e.g. "August 07 2026").
    pub date: String,
    /// Extensions merged into this file, in merge order.
    pub extensions: Vec<String>,
    /// Unique domain count reported by the merge pass.
    pub unique_count: usize,
    /// Output subfolder, used in the published raw-file URL.
    pub output_subfolder: String,
    /// Skip the static localhost/broadcast entries.
    pub skip_static_hosts: bool,
    /// Emit the machine-hostname entries (Linux resolver convention).
    pub is_linux_host: bool,
    /// Machine hostname for the Linux entries, when known.
    pub local_hostname: Option<String>,
    /// Verbatim content of the local preamble file, when present.
    pub preamble: Option<String>,
}

/// Assemble the final hosts file from the merged body and metadata.
pub fn render(body: &[String], meta: &HeaderMeta) -> String {
    let mut out = String::new();

    out.push_str("# This hosts file is a merged collection of hosts from reputable sources,\n");
    out.push_str("# assembled and deduplicated by unihosts\n#\n");
    out.push_str(&format!("# Date: {}\n", meta.date));
    if !meta.extensions.is_empty() {
        out.push_str(&format!(
            "# Extensions added to this file: {}\n",
            meta.extensions.join(", ")
        ));
    }
    out.push_str(&format!(
        "# Number of unique domains: {}\n#\n",
        format_count_with_separator(meta.unique_count)
    ));
    out.push_str(&format!(
        "# Fetch the latest version of this file: {}{}hosts\n",
        RAW_FILE_URL_BASE,
        subfolder_prefix(&meta.output_subfolder)
    ));
    out.push_str(&format!("# Project home page: {}\n#\n", PROJECT_URL));
    out.push_str("# ===============================================================\n");
    out.push('\n');

    if !meta.skip_static_hosts {
        for entry in STATIC_ENTRIES {
            out.push_str(entry);
            out.push('\n');
        }
        if meta.is_linux_host {
            if let Some(hostname) = meta.local_hostname.as_deref() {
                out.push_str(&format!("127.0.1.1 {}\n", hostname));
                out.push_str(&format!("127.0.0.53 {}\n", hostname));
            }
        }
        out.push('\n');
    }

    if let Some(preamble) = meta.preamble.as_deref() {
        out.push_str(preamble);
    }

    for line in body {
        out.push_str(line);
    }

    out
}

/// Subfolder component of the published URL: empty, or `<subfolder>/`.
fn subfolder_prefix(subfolder: &str) -> String {
    if subfolder.is_empty() {
        String::new()
    } else {
        format!("{}/", subfolder.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> HeaderMeta {
        HeaderMeta {
            date: "August 07 2026".to_string(),
            unique_count: 1234,
            ..Default::default()
        }
    }

    fn body() -> Vec<String> {
        vec!["0.0.0.0 a.com\n".to_string(), "0.0.0.0 b.com\n".to_string()]
    }

    #[test]
    fn test_banner_fields() {
        let rendered = render(&body(), &meta());
        assert!(rendered.starts_with("# This hosts file is a merged collection"));
        assert!(rendered.contains("# Date: August 07 2026\n"));
        assert!(rendered.contains("# Number of unique domains: 1,234\n"));
        assert!(rendered.contains("# ===============================================================\n"));
        assert!(!rendered.contains("# Extensions added to this file"));
    }

    #[test]
    fn test_extensions_listed_when_present() {
        let mut m = meta();
        m.extensions = vec!["gambling".to_string(), "social".to_string()];
        let rendered = render(&body(), &m);
        assert!(rendered.contains("# Extensions added to this file: gambling, social\n"));
    }

    #[test]
    fn test_static_entries_present_by_default() {
        let rendered = render(&body(), &meta());
        assert!(rendered.contains("127.0.0.1 localhost\n"));
        assert!(rendered.contains("127.0.0.1 localhost.localdomain\n"));
        assert!(rendered.contains("127.0.0.1 local\n"));
        assert!(rendered.contains("255.255.255.255 broadcasthost\n"));
        assert!(rendered.contains("::1 localhost\n"));
        assert!(rendered.contains("fe80::1%lo0 localhost\n"));
        assert!(rendered.contains("0.0.0.0 0.0.0.0\n"));
    }

    #[test]
    fn test_static_entries_skipped() {
        let mut m = meta();
        m.skip_static_hosts = true;
        let rendered = render(&body(), &m);
        assert!(!rendered.contains("broadcasthost"));
        assert!(!rendered.contains("::1 localhost"));
    }

    #[test]
    fn test_linux_hostname_entries() {
        let mut m = meta();
        m.is_linux_host = true;
        m.local_hostname = Some("gateway".to_string());
        let rendered = render(&body(), &m);
        assert!(rendered.contains("127.0.1.1 gateway\n"));
        assert!(rendered.contains("127.0.0.53 gateway\n"));
    }

    #[test]
    fn test_no_hostname_entries_off_linux() {
        let mut m = meta();
        m.is_linux_host = false;
        m.local_hostname = Some("gateway".to_string());
        let rendered = render(&body(), &m);
        assert!(!rendered.contains("127.0.1.1"));
        assert!(!rendered.contains("127.0.0.53"));
    }

    #[test]
    fn test_preamble_inserted_before_body() {
        let mut m = meta();
        m.preamble = Some("10.0.0.5 nas.lan\n".to_string());
        let rendered = render(&body(), &m);
        let preamble_pos = rendered.find("10.0.0.5 nas.lan").unwrap();
        let body_pos = rendered.find("0.0.0.0 a.com").unwrap();
        assert!(preamble_pos < body_pos);
    }

    #[test]
    fn test_body_appended_in_order() {
        let rendered = render(&body(), &meta());
        let a = rendered.find("0.0.0.0 a.com\n").unwrap();
        let b = rendered.find("0.0.0.0 b.com\n").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_raw_url_without_subfolder() {
        let rendered = render(&body(), &meta());
        assert!(rendered.contains(&format!(
            "# Fetch the latest version of this file: {}hosts\n",
            RAW_FILE_URL_BASE
        )));
    }

    #[test]
    fn test_raw_url_with_subfolder() {
        let mut m = meta();
        m.output_subfolder = "alternates/gambling".to_string();
        let rendered = render(&body(), &m);
        assert!(rendered.contains("alternates/gambling/hosts\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render(&body(), &meta()), render(&body(), &meta()));
    }
}
