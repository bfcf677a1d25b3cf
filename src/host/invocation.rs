//! Argument-vector construction for the host launcher
//!
//! Every logical operation maps to exactly one argument vector on
//! `wsl.exe`, paired with the timeout ceiling appropriate for it. The
//! vectors here are the launcher's fixed contract; building them in one
//! place keeps the rest of the crate free of flag spelling.

use std::ffi::OsString;
use std::time::Duration;

/// Default timeout for interactive shell commands.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for quick state queries (version, status, terminate, ...).
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for bulk operations that move whole distribution archives.
pub const BULK_TIMEOUT: Duration = Duration::from_secs(300);
/// Timeout for unregistering a distribution.
pub const UNREGISTER_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for querying the online distribution catalogue.
pub const ONLINE_LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shell mode for advanced runs (`--shell-type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShellType {
    /// Non-login shell
    Standard,
    /// Login shell
    Login,
    /// No intermediate shell
    None,
}

impl ShellType {
    fn as_flag(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Login => "login",
            Self::None => "none",
        }
    }
}

/// Archive format for distribution export (`--export ... --format`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Tar,
    TarGz,
    TarXz,
    Vhd,
}

impl ExportFormat {
    fn as_flag(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarXz => "tar.xz",
            Self::Vhd => "vhd",
        }
    }
}

/// Options for the advanced run form. Empty options are simply not emitted;
/// the launcher applies its own defaults.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Target distribution (`-d`); default distribution when `None`
    pub distribution: Option<String>,
    /// Guest user to run as (`-u`)
    pub user: Option<String>,
    /// Working directory inside the guest (`--cd`)
    pub working_dir: Option<String>,
    /// Shell mode (`--shell-type`)
    pub shell_type: Option<ShellType>,
    /// Timeout override; [`DEFAULT_TIMEOUT`] when `None`
    pub timeout: Option<Duration>,
}

/// Options for `--install`.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Distribution to install; the launcher's default when `None`
    pub distribution: Option<String>,
    /// Force download from the web instead of the store
    pub web_download: bool,
    /// Do not launch the distribution after installing
    pub no_launch: bool,
}

/// One fully-built launcher invocation: the argument vector and the timeout
/// it runs under. Constructed per call, never persisted.
#[derive(Debug, Clone)]
pub struct Invocation {
    args: Vec<OsString>,
    timeout: Duration,
}

impl Invocation {
    fn new(timeout: Duration) -> Self {
        Self {
            args: Vec::new(),
            timeout,
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The argument vector, in order, excluding the program itself.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The timeout ceiling for this invocation.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Simple run: `sh -c <command>` in the default distribution.
    pub fn shell(command: &str, timeout: Option<Duration>) -> Self {
        Self::shell_in(None, command, timeout)
    }

    /// Run with distribution selector: prefixes `-d <name>` when a target
    /// distribution is supplied.
    pub fn shell_in(distribution: Option<&str>, command: &str, timeout: Option<Duration>) -> Self {
        let mut inv = Self::new(timeout.unwrap_or(DEFAULT_TIMEOUT));
        if let Some(distro) = distribution {
            inv = inv.arg("-d").arg(distro);
        }
        inv.arg("sh").arg("-c").arg(command)
    }

    /// Advanced run: optional distribution, user, working directory and
    /// shell mode, then `--exec sh -c <command>`.
    pub fn shell_advanced(command: &str, options: &RunOptions) -> Self {
        let mut inv = Self::new(options.timeout.unwrap_or(DEFAULT_TIMEOUT));
        if let Some(distro) = &options.distribution {
            inv = inv.arg("-d").arg(distro);
        }
        if let Some(user) = &options.user {
            inv = inv.arg("-u").arg(user);
        }
        if let Some(dir) = &options.working_dir {
            inv = inv.arg("--cd").arg(dir);
        }
        if let Some(shell) = options.shell_type {
            inv = inv.arg("--shell-type").arg(shell.as_flag());
        }
        inv.arg("--exec").arg("sh").arg("-c").arg(command)
    }

    /// `--version`
    pub fn version() -> Self {
        Self::new(QUERY_TIMEOUT).arg("--version")
    }

    /// `--status`
    pub fn status() -> Self {
        Self::new(QUERY_TIMEOUT).arg("--status")
    }

    /// `--shutdown`: stops every distribution and the utility VM.
    pub fn shutdown() -> Self {
        Self::new(QUERY_TIMEOUT).arg("--shutdown")
    }

    /// `-t <distro>`: terminate one distribution.
    pub fn terminate(distribution: &str) -> Self {
        Self::new(QUERY_TIMEOUT).arg("-t").arg(distribution)
    }

    /// `-s <distro>`: set the default distribution.
    pub fn set_default(distribution: &str) -> Self {
        Self::new(QUERY_TIMEOUT).arg("-s").arg(distribution)
    }

    /// `-l`: list installed distributions.
    pub fn list_installed() -> Self {
        Self::new(QUERY_TIMEOUT).arg("-l")
    }

    /// `-l --verbose`: list installed distributions with state and version.
    pub fn list_installed_verbose() -> Self {
        Self::new(QUERY_TIMEOUT).arg("-l").arg("--verbose")
    }

    /// `-l --online`: list distributions installable from the catalogue.
    pub fn list_online() -> Self {
        Self::new(ONLINE_LIST_TIMEOUT).arg("-l").arg("--online")
    }

    /// `--install [...]`
    pub fn install(options: &InstallOptions) -> Self {
        let mut inv = Self::new(BULK_TIMEOUT).arg("--install");
        if let Some(distro) = &options.distribution {
            inv = inv.arg(distro);
        }
        if options.web_download {
            inv = inv.arg("--web-download");
        }
        if options.no_launch {
            inv = inv.arg("--no-launch");
        }
        inv
    }

    /// `--export <distro> <file> --format <fmt>`
    pub fn export(distribution: &str, file: &str, format: ExportFormat) -> Self {
        Self::new(BULK_TIMEOUT)
            .arg("--export")
            .arg(distribution)
            .arg(file)
            .arg("--format")
            .arg(format.as_flag())
    }

    /// `--import <distro> <location> <file> --version <1|2>`
    pub fn import(distribution: &str, install_location: &str, file: &str, version: u8) -> Self {
        Self::new(BULK_TIMEOUT)
            .arg("--import")
            .arg(distribution)
            .arg(install_location)
            .arg(file)
            .arg("--version")
            .arg(version.to_string())
    }

    /// `--unregister <distro>`: unregister and delete a distribution.
    pub fn unregister(distribution: &str) -> Self {
        Self::new(UNREGISTER_TIMEOUT).arg("--unregister").arg(distribution)
    }
}
