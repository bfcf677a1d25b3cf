//! Parsing of the launcher's distribution listing output
//!
//! `wsl.exe -l --verbose` prints a header line followed by one
//! whitespace-delimited row per distribution, e.g.:
//!
//! ```text
//!   NAME            STATE           VERSION
//! * Ubuntu          Running         2
//!   Debian          Stopped         2
//! ```
//!
//! The parser is deliberately forgiving: short rows fall back to empty
//! fields, never to an error.

use serde::Serialize;

/// One installed distribution as reported by the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistroInfo {
    /// Distribution name (e.g., "Ubuntu-22.04")
    pub name: String,
    /// Reported state (e.g., "Running", "Stopped"); empty if absent
    pub state: String,
    /// Reported WSL version ("1" or "2"); empty if absent
    pub version: String,
    /// Whether this row was marked as the default distribution
    pub default: bool,
}

/// Parse the verbose listing table into structured rows.
///
/// The first line is the column header and is skipped; blank lines are
/// dropped. A leading `*` marks the default distribution.
pub fn parse_distro_table(output: &str) -> Vec<DistroInfo> {
    output
        .lines()
        .skip(1)
        .filter_map(parse_distro_line)
        .collect()
}

fn parse_distro_line(line: &str) -> Option<DistroInfo> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (default, row) = match trimmed.strip_prefix('*') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };

    let mut parts = row.split_whitespace();
    Some(DistroInfo {
        name: parts.next().unwrap_or_default().to_string(),
        state: parts.next().unwrap_or_default().to_string(),
        version: parts.next().unwrap_or_default().to_string(),
        default,
    })
}

/// Parse the `-l --online` catalogue: header skipped, blank lines dropped,
/// remaining lines returned trimmed but otherwise verbatim.
pub fn parse_online_list(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "  NAME            STATE           VERSION\n\
                         * Ubuntu          Running         2\n\
                           Debian          Stopped         2\n";

    #[test]
    fn parses_verbose_table() {
        let distros = parse_distro_table(TABLE);
        assert_eq!(distros.len(), 2);
        assert_eq!(distros[0].name, "Ubuntu");
        assert_eq!(distros[0].state, "Running");
        assert_eq!(distros[0].version, "2");
        assert!(distros[0].default);
        assert_eq!(distros[1].name, "Debian");
        assert!(!distros[1].default);
    }

    #[test]
    fn short_rows_default_to_empty_fields() {
        let distros = parse_distro_table("  NAME\n  Alpine\n");
        assert_eq!(distros.len(), 1);
        assert_eq!(distros[0].name, "Alpine");
        assert_eq!(distros[0].state, "");
        assert_eq!(distros[0].version, "");
    }

    #[test]
    fn blank_lines_are_dropped() {
        let distros = parse_distro_table("  NAME  STATE  VERSION\n\n  Ubuntu  Running  2\n\n");
        assert_eq!(distros.len(), 1);
    }

    #[test]
    fn header_only_table_is_empty() {
        assert!(parse_distro_table("  NAME  STATE  VERSION\n").is_empty());
        assert!(parse_distro_table("").is_empty());
    }

    #[test]
    fn online_list_skips_header_and_blanks() {
        let out = "NAME          FRIENDLY NAME\n\nUbuntu        Ubuntu\nDebian        Debian GNU/Linux\n";
        let lines = parse_online_list(out);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Ubuntu"));
    }
}
