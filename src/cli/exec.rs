//! `run` handler: shell execution inside the guest

use std::time::Duration;

use anyhow::bail;
use serde_json::json;

use crate::cli::{print_response, RunArgs};
use crate::host::{Invocation, Launcher, RunOptions};

/// Run a shell command, picking the launch form from the supplied options:
/// plain `sh -c` for the simple case, `-d` prefixed when a distribution is
/// named, and the `--exec` advanced form once user, working directory or
/// shell mode come into play.
pub async fn run(launcher: &Launcher, args: RunArgs) -> anyhow::Result<()> {
    let timeout = args.timeout.map(Duration::from_secs);

    let advanced =
        args.user.is_some() || args.working_dir.is_some() || args.shell_type.is_some();
    let invocation = if advanced {
        Invocation::shell_advanced(
            &args.command,
            &RunOptions {
                distribution: args.distribution.clone(),
                user: args.user.clone(),
                working_dir: args.working_dir.clone(),
                shell_type: args.shell_type,
                timeout,
            },
        )
    } else {
        Invocation::shell_in(args.distribution.as_deref(), &args.command, timeout)
    };

    let outcome = launcher.invoke(&invocation).await;

    print_response(&json!({
        "success": outcome.success(),
        "command": args.command,
        "distribution": args.distribution.as_deref().unwrap_or("default"),
        "exit_code": outcome.exit_code,
        "stdout": outcome.stdout,
        "stderr": outcome.stderr,
    }));

    if !outcome.success() {
        bail!("command exited with code {}: {}", outcome.exit_code, outcome.stderr);
    }
    Ok(())
}
