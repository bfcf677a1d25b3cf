//! Command-line surface
//!
//! Every bridge and file operation is exposed as one subcommand. Handlers
//! are thin: they forward typed arguments to the launcher or file manager,
//! echo the inputs back, and print a JSON response with a success flag and
//! either a payload or an error detail.

pub mod distro;
pub mod exec;
pub mod files;

use clap::{Args, Parser, Subcommand};

use crate::core::paths::{to_windows_path, to_wsl_path};
use crate::host::{ExportFormat, Launcher, ShellType};

/// Process exit codes for scripting against the CLI.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const LAUNCHER_MISSING: i32 = 2;
    pub const CLI_TIMEOUT: i32 = 3;
    pub const PARSE_ERROR: i32 = 4;
}

/// Drive a WSL guest from the command line
#[derive(Debug, Parser)]
#[command(name = "wslbridge", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Emit log records as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a shell command inside the guest
    Run(RunArgs),
    /// List distributions (installed by default)
    List(ListArgs),
    /// Show launcher status information
    Status,
    /// Show the launcher version
    Version,
    /// Stop all distributions and the utility VM
    Shutdown,
    /// Terminate one distribution
    Terminate {
        /// Distribution to terminate
        distribution: String,
    },
    /// Set the default distribution
    SetDefault {
        /// Distribution to make the default
        distribution: String,
    },
    /// Show the name of the default distribution
    DefaultDistro,
    /// Install a distribution
    Install(InstallArgs),
    /// Export a distribution to an archive
    Export(ExportArgs),
    /// Import a distribution from an archive
    Import(ImportArgs),
    /// Unregister and delete a distribution
    Unregister {
        /// Distribution to unregister
        distribution: String,
    },
    /// Translate between Windows and WSL path forms
    #[command(subcommand)]
    Path(PathCommand),
    /// File and directory operations inside the guest
    Fs(FsArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// The shell command to run
    pub command: String,
    /// Target distribution (default distribution when omitted)
    #[arg(short, long)]
    pub distribution: Option<String>,
    /// Guest user to run as (switches to the advanced launch form)
    #[arg(short, long)]
    pub user: Option<String>,
    /// Working directory inside the guest
    #[arg(long = "cd")]
    pub working_dir: Option<String>,
    /// Shell mode for the advanced launch form
    #[arg(long)]
    pub shell_type: Option<ShellType>,
    /// Timeout in seconds (default: 30)
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// List distributions available online instead of installed ones
    #[arg(long, conflicts_with = "names")]
    pub online: bool,

    /// Print installed distribution names only, without state or version
    #[arg(long)]
    pub names: bool,
}

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Distribution to install (launcher default when omitted)
    pub distribution: Option<String>,
    /// Download from the web instead of the store
    #[arg(long)]
    pub web_download: bool,
    /// Do not launch the distribution after installing
    #[arg(long)]
    pub no_launch: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Distribution to export
    pub distribution: String,
    /// Destination archive path (Windows form)
    pub file: String,
    /// Archive format
    #[arg(long, value_enum, default_value = "tar")]
    pub format: ExportFormat,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Name for the imported distribution
    pub distribution: String,
    /// Install location (Windows form)
    pub location: String,
    /// Source archive path (Windows form)
    pub file: String,
    /// WSL version for the imported distribution
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub version: u8,
}

#[derive(Debug, Subcommand)]
pub enum PathCommand {
    /// Windows drive-letter path to /mnt form
    ToWsl { path: String },
    /// /mnt form back to a Windows drive-letter path
    ToWindows { path: String },
}

#[derive(Debug, Args)]
pub struct FsArgs {
    /// Target distribution (default distribution when omitted)
    #[arg(short, long, global = true)]
    pub distribution: Option<String>,

    #[command(subcommand)]
    pub command: FsCommand,
}

#[derive(Debug, Subcommand)]
pub enum FsCommand {
    /// Print a file's content
    Read { path: String },
    /// Create or overwrite a file
    Write { path: String, content: String },
    /// Append to a file
    Append { path: String, content: String },
    /// Create a directory
    Mkdir {
        path: String,
        /// Fail if parent directories are missing
        #[arg(long)]
        no_parents: bool,
    },
    /// List a directory
    Ls {
        #[arg(default_value = "~")]
        path: String,
    },
    /// Delete a file or directory
    Rm {
        path: String,
        /// Delete directories recursively
        #[arg(short, long)]
        recursive: bool,
    },
    /// Copy a file or directory
    Cp {
        source: String,
        destination: String,
        /// Copy directories recursively
        #[arg(short, long)]
        recursive: bool,
    },
    /// Move or rename a file or directory
    Mv { source: String, destination: String },
    /// Show detailed file metadata
    Stat { path: String },
    /// Check whether a path exists
    Exists { path: String },
    /// Check whether a path is a directory
    IsDir { path: String },
    /// Check whether a path is a regular file
    IsFile { path: String },
    /// Print the guest shell's working directory
    Pwd,
    /// Resolve a directory change
    Cd { path: String },
    /// Print a line range of a file
    Lines {
        path: String,
        /// First line (1-based)
        #[arg(long, default_value_t = 1)]
        start: u64,
        /// Last line (end of file when omitted)
        #[arg(long)]
        end: Option<u64>,
    },
    /// Search a file for a pattern
    Search {
        path: String,
        pattern: String,
        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,
    },
    /// Count the lines of a file
    Count { path: String },
}

/// Print one JSON response to stdout.
pub(crate) fn print_response(value: &serde_json::Value) {
    // Pretty-print so terminal use stays readable; scripts can re-parse.
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

/// Route a parsed command to its handler.
pub async fn dispatch(launcher: &Launcher, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => exec::run(launcher, args).await,
        Commands::List(args) => distro::list(launcher, args).await,
        Commands::Status => distro::status(launcher).await,
        Commands::Version => distro::version(launcher).await,
        Commands::Shutdown => distro::shutdown(launcher).await,
        Commands::Terminate { distribution } => distro::terminate(launcher, &distribution).await,
        Commands::SetDefault { distribution } => distro::set_default(launcher, &distribution).await,
        Commands::DefaultDistro => distro::default_distro(launcher).await,
        Commands::Install(args) => distro::install(launcher, args).await,
        Commands::Export(args) => distro::export(launcher, args).await,
        Commands::Import(args) => distro::import(launcher, args).await,
        Commands::Unregister { distribution } => distro::unregister(launcher, &distribution).await,
        Commands::Path(command) => {
            let (path, translated) = match command {
                PathCommand::ToWsl { path } => {
                    let translated = to_wsl_path(&path);
                    (path, translated)
                }
                PathCommand::ToWindows { path } => {
                    let translated = to_windows_path(&path);
                    (path, translated)
                }
            };
            print_response(&serde_json::json!({
                "success": true,
                "path": path,
                "translated": translated,
            }));
            Ok(())
        }
        Commands::Fs(args) => files::run(launcher, args).await,
    }
}
