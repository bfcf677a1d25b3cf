//! Launcher process execution with bounded timeouts
//!
//! [`Launcher`] spawns one `wsl.exe` child per invocation, captures both
//! output streams, and folds every failure shape into a
//! [`CommandOutcome`]. There is no shared state and no retry: callers that
//! need retries reissue the call.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::CommandOutcome;
use crate::host::invocation::Invocation;

/// Name of the host-side launcher executable.
pub const LAUNCHER_PROGRAM: &str = "wsl.exe";

/// Message placed in stderr when an invocation exceeds its timeout.
const TIMEOUT_MESSAGE: &str = "execution timed out";

/// Handle on the host launcher executable.
///
/// Construct one explicitly and pass it to consumers; substituting a
/// different program (a fake launcher in tests, an alternate install
/// location) is just a different constructor argument.
#[derive(Debug, Clone)]
pub struct Launcher {
    program: PathBuf,
}

impl Launcher {
    /// Launcher resolved from `PATH`, falling back to the bare program name
    /// so spawn errors surface as outcomes rather than at construction.
    pub fn new() -> Self {
        let program =
            which::which(LAUNCHER_PROGRAM).unwrap_or_else(|_| PathBuf::from(LAUNCHER_PROGRAM));
        Self { program }
    }

    /// Launcher backed by an explicit program path.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Execute one invocation and capture its outcome.
    ///
    /// Spawns exactly one child process. A child that cannot be started or
    /// does not finish within the invocation's timeout yields a bridge
    /// failure outcome (exit code -1); it is never surfaced as an error.
    pub async fn invoke(&self, invocation: &Invocation) -> CommandOutcome {
        tracing::debug!(
            program = %self.program.display(),
            args = ?invocation.args(),
            timeout_secs = invocation.timeout().as_secs(),
            "invoking launcher"
        );

        let mut child = match Command::new(&self.program)
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(program = %self.program.display(), error = %e, "launcher spawn failed");
                return CommandOutcome::bridge_failure(e.to_string());
            }
        };

        let waited = timeout(invocation.timeout(), async {
            let mut stdout_buf = Vec::new();
            let mut stderr_buf = Vec::new();

            if let Some(mut stdout) = child.stdout.take() {
                let _ = stdout.read_to_end(&mut stdout_buf).await;
            }
            if let Some(mut stderr) = child.stderr.take() {
                let _ = stderr.read_to_end(&mut stderr_buf).await;
            }

            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, stdout_buf, stderr_buf))
        })
        .await;

        match waited {
            Ok(Ok((status, stdout_buf, stderr_buf))) => {
                CommandOutcome::captured(status.code().unwrap_or(-1), &stdout_buf, &stderr_buf)
            }
            Ok(Err(e)) => CommandOutcome::bridge_failure(e.to_string()),
            Err(_) => {
                tracing::warn!(
                    timeout_secs = invocation.timeout().as_secs(),
                    "launcher invocation timed out, killing child"
                );
                let _ = child.kill().await;
                CommandOutcome::bridge_failure(TIMEOUT_MESSAGE)
            }
        }
    }

    /// Name of the default distribution, read from `$WSL_DISTRO_NAME` inside
    /// the guest. Empty when the query fails.
    pub async fn default_distribution(&self) -> String {
        let outcome = self
            .invoke(&Invocation::shell("echo \"$WSL_DISTRO_NAME\"", None))
            .await;
        if outcome.success() {
            outcome.stdout
        } else {
            String::new()
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // The timeout / launch-failure contract is independent of the real
    // launcher, so these tests substitute ordinary programs for wsl.exe.
    // `env sh -c <command>` mirrors the launcher's shell-run argv exactly.

    #[cfg(unix)]
    fn fake_launcher() -> Launcher {
        Launcher::with_program("env")
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn simple_run_captures_trimmed_stdout() {
        let outcome = fake_launcher()
            .invoke(&Invocation::shell("echo hello", Some(Duration::from_secs(5))))
            .await;
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.stdout, "hello");
        assert_eq!(outcome.stderr, "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn guest_exit_code_passes_through() {
        let outcome = fake_launcher()
            .invoke(&Invocation::shell("exit 42", Some(Duration::from_secs(5))))
            .await;
        assert_eq!(outcome.exit_code, 42);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stderr_is_captured_separately() {
        let outcome = fake_launcher()
            .invoke(&Invocation::shell(
                "echo out; echo err >&2",
                Some(Duration::from_secs(5)),
            ))
            .await;
        assert_eq!(outcome.stdout, "out");
        assert_eq!(outcome.stderr, "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_yields_bridge_failure() {
        let outcome = fake_launcher()
            .invoke(&Invocation::shell(
                "sleep 10; echo late",
                Some(Duration::from_millis(200)),
            ))
            .await;
        assert_eq!(outcome.exit_code, -1);
        assert!(outcome.stdout.is_empty());
        assert_eq!(outcome.stderr, TIMEOUT_MESSAGE);
    }

    #[tokio::test]
    async fn launch_failure_yields_bridge_failure() {
        let launcher = Launcher::with_program("/nonexistent/launcher-binary");
        let outcome = launcher.invoke(&Invocation::version()).await;
        assert_eq!(outcome.exit_code, -1);
        assert!(outcome.stdout.is_empty());
        assert!(!outcome.stderr.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn fake_launcher_listing_round_trip() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        // A stand-in launcher that prints a canned verbose listing.
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-wsl.sh");
        let mut file = std::fs::File::create(&script).unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        writeln!(file, "echo '  NAME     STATE     VERSION'").unwrap();
        writeln!(file, "echo '* Ubuntu   Running   2'").unwrap();
        writeln!(file, "echo '  Debian   Stopped   2'").unwrap();
        drop(file);
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let launcher = Launcher::with_program(&script);
        let outcome = launcher.invoke(&Invocation::list_installed_verbose()).await;
        assert!(outcome.success());

        let distros = crate::core::parse_distro_table(&outcome.stdout);
        assert_eq!(distros.len(), 2);
        assert_eq!(distros[0].name, "Ubuntu");
        assert!(distros[0].default);
        assert_eq!(distros[1].state, "Stopped");
    }
}
