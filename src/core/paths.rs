//! Translation between Windows drive-letter paths and WSL mount paths
//!
//! Both functions are pure and total: input that does not match the
//! respective canonical grammar is returned unchanged rather than rejected.
//! Round-tripping is therefore only an identity over the canonical subset
//! (`X:\a\b` and `/mnt/x/a/b` shapes).

/// Mount prefix under which WSL exposes Windows drives.
const MOUNT_PREFIX: &str = "/mnt/";

/// Convert a Windows path like `C:\Users\Name` to its WSL counterpart
/// `/mnt/c/Users/Name`. Anything without a drive-letter-colon prefix passes
/// through unchanged.
pub fn to_wsl_path(path: &str) -> String {
    let mut chars = path.chars();
    let (drive, colon) = match (chars.next(), chars.next()) {
        (Some(d), Some(c)) => (d, c),
        _ => return path.to_string(),
    };
    if colon != ':' || !drive.is_ascii_alphabetic() {
        return path.to_string();
    }

    let mut rest = path[2..].replace('\\', "/");
    while rest.contains("//") {
        rest = rest.replace("//", "/");
    }
    let rest = rest.trim_start_matches('/');

    format!("{}{}/{}", MOUNT_PREFIX, drive.to_ascii_lowercase(), rest)
}

/// Convert a WSL mount path like `/mnt/c/Users/Name` back to the Windows
/// form `C:\Users\Name`. Paths not rooted under `/mnt/` (or with an empty
/// drive segment) pass through unchanged.
pub fn to_windows_path(path: &str) -> String {
    if !path.starts_with(MOUNT_PREFIX) {
        return path.to_string();
    }

    let parts: Vec<&str> = path.split('/').collect();
    // parts[0] is "" (leading slash), parts[1] is "mnt", parts[2] the drive.
    let drive = match parts.get(2) {
        Some(d) if !d.is_empty() => d.to_uppercase(),
        _ => return path.to_string(),
    };

    format!("{}:\\{}", drive, parts[3..].join("\\"))
}
