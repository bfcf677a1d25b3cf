//! Parsing of `ls -la` output into directory entries

use serde::Serialize;

/// One entry of a guest directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    /// Entry name; multi-word names are rejoined with single spaces
    pub name: String,
    /// Permission string, e.g. `drwxr-xr-x`
    pub permissions: String,
    /// Whether the permission string classifies this entry as a directory
    pub is_dir: bool,
}

/// Tokenize `ls -la`-style lines into entries.
///
/// A long-format line has at least 9 whitespace-separated tokens
/// (permissions, links, owner, group, size, three date tokens, name).
/// Anything shorter -- the `total N` summary, blank lines, truncated rows --
/// is skipped rather than treated as an error.
pub fn parse_ls_output(output: &str) -> Vec<DirEntry> {
    output.lines().filter_map(parse_ls_line).collect()
}

fn parse_ls_line(line: &str) -> Option<DirEntry> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 9 {
        return None;
    }

    let permissions = parts[0].to_string();
    let is_dir = permissions.starts_with('d');
    Some(DirEntry {
        name: parts[8..].join(" "),
        permissions,
        is_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "total 16\n\
drwxr-xr-x 2 user user 4096 Jan  5 10:00 projects\n\
-rw-r--r-- 1 user user  220 Jan  5 10:00 .bashrc\n\
-rw-r--r-- 1 user user   64 Jan  5 10:00 with spaces.txt\n";

    #[test]
    fn classifies_directories_and_files() {
        let entries = parse_ls_output(SAMPLE);
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_dir);
        assert_eq!(entries[0].name, "projects");
        assert!(!entries[1].is_dir);
        assert_eq!(entries[1].permissions, "-rw-r--r--");
    }

    #[test]
    fn short_lines_are_skipped_not_errors() {
        let entries = parse_ls_output("total 16\n\ngarbage line\n");
        assert!(entries.is_empty());
    }

    #[test]
    fn names_with_spaces_are_rejoined() {
        let entries = parse_ls_output(SAMPLE);
        assert_eq!(entries[2].name, "with spaces.txt");
    }
}
