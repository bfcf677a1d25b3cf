//! Uniform result record for every launcher invocation

use serde::Serialize;

/// Exit code reserved for failures inside the bridge itself (timeout or
/// launch error). Guest commands report codes in `0..=255`, so callers can
/// always tell the two tiers apart.
pub const BRIDGE_FAILURE_CODE: i32 = -1;

/// The outcome of one launcher invocation: exit code plus both captured
/// text streams. Produced exactly once per attempt and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    /// Exit code of the child process, or [`BRIDGE_FAILURE_CODE`]
    pub exit_code: i32,
    /// Captured standard output, lossily decoded and trimmed
    pub stdout: String,
    /// Captured standard error, lossily decoded and trimmed
    pub stderr: String,
}

impl CommandOutcome {
    /// Build an outcome from a completed child process.
    ///
    /// Both streams are decoded permissively (undecodable bytes are
    /// replaced) and trimmed of surrounding whitespace so that downstream
    /// string comparisons are insulated from trailing-newline variance.
    pub fn captured(exit_code: i32, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            exit_code,
            stdout: String::from_utf8_lossy(stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }

    /// Build an outcome for a failure inside the bridge: the child never ran
    /// to completion. The diagnostic goes to stderr, stdout stays empty.
    pub fn bridge_failure(message: impl Into<String>) -> Self {
        Self {
            exit_code: BRIDGE_FAILURE_CODE,
            stdout: String::new(),
            stderr: message.into(),
        }
    }

    /// Whether the guest command reported success.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
