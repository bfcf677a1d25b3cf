//! File and directory operations inside the guest
//!
//! Every operation composes one POSIX shell command over the launcher
//! bridge, branches on the outcome's exit code, and returns a typed result.
//! Nonzero guest exits surface the command's stderr verbatim; bridge
//! failures (timeout, launch error) look the same to callers since they
//! also arrive as nonzero exit codes.

use crate::core::CommandOutcome;
use crate::files::listing::{parse_ls_output, DirEntry};
use crate::files::quote::single_quote;
use crate::files::FsError;
use crate::host::{Invocation, Launcher};

/// File manager bound to a launcher and, optionally, a target distribution.
#[derive(Debug, Clone)]
pub struct FileManager<'a> {
    launcher: &'a Launcher,
    distribution: Option<String>,
}

impl<'a> FileManager<'a> {
    /// Manager operating on the default distribution.
    pub fn new(launcher: &'a Launcher) -> Self {
        Self {
            launcher,
            distribution: None,
        }
    }

    /// Target a specific distribution instead of the default.
    pub fn with_distribution(mut self, distribution: impl Into<String>) -> Self {
        self.distribution = Some(distribution.into());
        self
    }

    async fn run(&self, command: &str) -> CommandOutcome {
        self.launcher
            .invoke(&Invocation::shell_in(
                self.distribution.as_deref(),
                command,
                None,
            ))
            .await
    }

    /// Run a command and map nonzero exits to [`FsError::Command`].
    async fn run_checked(&self, command: &str) -> Result<CommandOutcome, FsError> {
        let outcome = self.run(command).await;
        if outcome.success() {
            Ok(outcome)
        } else {
            Err(FsError::Command(outcome.stderr))
        }
    }

    /// Read a whole file.
    pub async fn read_file(&self, path: &str) -> Result<String, FsError> {
        let command = format!("cat {}", single_quote(path));
        Ok(self.run_checked(&command).await?.stdout)
    }

    /// Create or overwrite a file with the given content.
    pub async fn write_file(&self, path: &str, content: &str) -> Result<(), FsError> {
        let command = format!("echo {} > {}", single_quote(content), single_quote(path));
        self.run_checked(&command).await.map(|_| ())
    }

    /// Append content to a file, creating it if needed.
    pub async fn append_file(&self, path: &str, content: &str) -> Result<(), FsError> {
        let command = format!("echo {} >> {}", single_quote(content), single_quote(path));
        self.run_checked(&command).await.map(|_| ())
    }

    /// Create a directory; with `parents`, also create missing ancestors.
    pub async fn create_directory(&self, path: &str, parents: bool) -> Result<(), FsError> {
        let flag = if parents { "-p " } else { "" };
        let command = format!("mkdir {}{}", flag, single_quote(path));
        self.run_checked(&command).await.map(|_| ())
    }

    /// List a directory in long format.
    pub async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let command = format!("ls -la {}", single_quote(path));
        let outcome = self.run_checked(&command).await?;
        Ok(parse_ls_output(&outcome.stdout))
    }

    /// Delete a file, or a whole tree with `recursive`.
    pub async fn delete(&self, path: &str, recursive: bool) -> Result<(), FsError> {
        let flags = if recursive { "-rf" } else { "-f" };
        let command = format!("rm {} {}", flags, single_quote(path));
        self.run_checked(&command).await.map(|_| ())
    }

    /// Copy a file, or a directory tree with `recursive`.
    pub async fn copy(&self, source: &str, destination: &str, recursive: bool) -> Result<(), FsError> {
        let flag = if recursive { "-r " } else { "" };
        let command = format!(
            "cp {}{} {}",
            flag,
            single_quote(source),
            single_quote(destination)
        );
        self.run_checked(&command).await.map(|_| ())
    }

    /// Move or rename a file or directory.
    pub async fn rename(&self, source: &str, destination: &str) -> Result<(), FsError> {
        let command = format!("mv {} {}", single_quote(source), single_quote(destination));
        self.run_checked(&command).await.map(|_| ())
    }

    /// Detailed metadata, as `stat` prints it.
    pub async fn metadata(&self, path: &str) -> Result<String, FsError> {
        let command = format!("stat {}", single_quote(path));
        Ok(self.run_checked(&command).await?.stdout)
    }

    /// Whether a path exists at all.
    pub async fn exists(&self, path: &str) -> Result<bool, FsError> {
        self.sentinel_check("-e", path, "exists", "not_exists").await
    }

    /// Whether a path is a directory.
    pub async fn is_directory(&self, path: &str) -> Result<bool, FsError> {
        self.sentinel_check("-d", path, "dir", "not_dir").await
    }

    /// Whether a path is a regular file.
    pub async fn is_file(&self, path: &str) -> Result<bool, FsError> {
        self.sentinel_check("-f", path, "file", "not_file").await
    }

    /// Evaluate a POSIX test and compare trimmed stdout to the positive
    /// sentinel. The conditional itself always exits 0; a nonzero exit
    /// means the command never ran properly.
    async fn sentinel_check(
        &self,
        test_flag: &str,
        path: &str,
        positive: &str,
        negative: &str,
    ) -> Result<bool, FsError> {
        let command = format!(
            "if [ {} {} ]; then echo '{}'; else echo '{}'; fi",
            test_flag,
            single_quote(path),
            positive,
            negative
        );
        let outcome = self.run_checked(&command).await?;
        Ok(outcome.stdout == positive)
    }

    /// Working directory of a fresh guest shell.
    pub async fn current_directory(&self) -> Result<String, FsError> {
        Ok(self.run_checked("pwd").await?.stdout)
    }

    /// Resolve a directory change, returning the directory landed in.
    /// Each invocation is a fresh shell, so this verifies rather than
    /// persists the change.
    pub async fn change_directory(&self, path: &str) -> Result<String, FsError> {
        let command = format!("cd {} && pwd", single_quote(path));
        Ok(self.run_checked(&command).await?.stdout)
    }

    /// Read a line range (1-based, inclusive). Without an upper bound the
    /// selection runs from `start` to the end of the file.
    pub async fn read_lines(
        &self,
        path: &str,
        start: u64,
        end: Option<u64>,
    ) -> Result<String, FsError> {
        let selection = match end {
            Some(end) => format!("{},{}p", start, end),
            None => format!("{},$p", start),
        };
        let command = format!("sed -n {} {}", single_quote(&selection), single_quote(path));
        Ok(self.run_checked(&command).await?.stdout)
    }

    /// Search a file for a pattern, returning `line:match` rows. With
    /// `regex` the pattern is a basic regular expression, otherwise a fixed
    /// string.
    pub async fn search(
        &self,
        path: &str,
        pattern: &str,
        regex: bool,
    ) -> Result<Vec<String>, FsError> {
        let flags = if regex { "-n" } else { "-nF" };
        let command = format!("grep {} {} {}", flags, single_quote(pattern), single_quote(path));
        let outcome = self.run_checked(&command).await?;
        if outcome.stdout.is_empty() {
            return Ok(Vec::new());
        }
        Ok(outcome.stdout.lines().map(str::to_string).collect())
    }

    /// Count the lines of a file.
    pub async fn count_lines(&self, path: &str) -> Result<u64, FsError> {
        let command = format!("wc -l {}", single_quote(path));
        let outcome = self.run_checked(&command).await?;
        outcome
            .stdout
            .split_whitespace()
            .next()
            .and_then(|count| count.parse().ok())
            .ok_or_else(|| FsError::Parse(format!("no line count in {:?}", outcome.stdout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `env sh -c <command>` makes the bridge run its guest one-liners in a
    // local shell, which is enough to exercise the full command paths.
    #[cfg(unix)]
    fn manager_over(launcher: &Launcher) -> FileManager<'_> {
        FileManager::new(launcher)
    }

    #[cfg(unix)]
    fn fake_launcher() -> Launcher {
        Launcher::with_program("env")
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_read_append_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let path = path.to_str().unwrap();

        let launcher = fake_launcher();
        let files = manager_over(&launcher);

        files.write_file(path, "first line").await.unwrap();
        files.append_file(path, "second line").await.unwrap();
        let content = files.read_file(path).await.unwrap();
        assert_eq!(content, "first line\nsecond line");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn content_with_quotes_and_metacharacters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tricky.txt");
        let path = path.to_str().unwrap();

        let launcher = fake_launcher();
        let files = manager_over(&launcher);

        let content = "it's $(dangerous) `stuff` \\here";
        files.write_file(path, content).await.unwrap();
        assert_eq!(files.read_file(path).await.unwrap(), content);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn read_missing_file_surfaces_stderr() {
        let launcher = fake_launcher();
        let files = manager_over(&launcher);

        let err = files.read_file("/definitely/not/there").await.unwrap_err();
        match err {
            FsError::Command(stderr) => assert!(!stderr.is_empty()),
            other => panic!("expected command failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn existence_and_type_checks() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_str().unwrap();
        let file_path = dir.path().join("a.txt");
        let file_path = file_path.to_str().unwrap();

        let launcher = fake_launcher();
        let files = manager_over(&launcher);
        files.write_file(file_path, "x").await.unwrap();

        assert!(files.exists(dir_path).await.unwrap());
        assert!(files.is_directory(dir_path).await.unwrap());
        assert!(!files.is_file(dir_path).await.unwrap());
        assert!(files.is_file(file_path).await.unwrap());
        assert!(!files.exists("/no/such/path").await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn directory_operations() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        let nested = nested.to_str().unwrap();

        let launcher = fake_launcher();
        let files = manager_over(&launcher);

        files.create_directory(nested, true).await.unwrap();
        assert!(files.is_directory(nested).await.unwrap());

        let entries = files
            .list_directory(dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert!(entries.iter().any(|e| e.name == "a" && e.is_dir));

        files.delete(nested, true).await.unwrap();
        assert!(!files.exists(nested).await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_rename_and_stat() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let src = src.to_str().unwrap();
        let copied = dir.path().join("copied.txt");
        let copied = copied.to_str().unwrap();
        let moved = dir.path().join("moved.txt");
        let moved = moved.to_str().unwrap();

        let launcher = fake_launcher();
        let files = manager_over(&launcher);

        files.write_file(src, "payload").await.unwrap();
        files.copy(src, copied, false).await.unwrap();
        files.rename(copied, moved).await.unwrap();
        assert!(files.is_file(moved).await.unwrap());
        assert!(!files.exists(copied).await.unwrap());

        let info = files.metadata(moved).await.unwrap();
        assert!(info.contains("moved.txt"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn line_ranges_search_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        let path = path.to_str().unwrap();

        let launcher = fake_launcher();
        let files = manager_over(&launcher);

        files.write_file(path, "alpha\nbeta\ngamma\nbeta tail").await.unwrap();

        assert_eq!(files.read_lines(path, 2, Some(3)).await.unwrap(), "beta\ngamma");
        // No upper bound: from start line to end of stream.
        assert_eq!(files.read_lines(path, 3, None).await.unwrap(), "gamma\nbeta tail");

        let hits = files.search(path, "beta", false).await.unwrap();
        assert_eq!(hits, vec!["2:beta".to_string(), "4:beta tail".to_string()]);

        assert_eq!(files.count_lines(path).await.unwrap(), 4);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn current_and_change_directory() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = fake_launcher();
        let files = manager_over(&launcher);

        let pwd = files.current_directory().await.unwrap();
        assert!(pwd.starts_with('/'));

        let landed = files
            .change_directory(dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert!(landed.ends_with(dir.path().file_name().unwrap().to_str().unwrap()));
    }
}
