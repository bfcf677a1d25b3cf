//! wslbridge - drive a WSL guest from the Windows host
//!
//! Runs shell commands inside a WSL distribution, manages distribution
//! lifecycle (list, install, export/import, shutdown), and performs guest
//! file operations by translating them into shell commands executed over
//! the `wsl.exe` launcher.

mod cli;
mod core;
mod files;
mod host;
mod logging;

use clap::Parser;
use cli::{exit_codes, Cli};
use host::Launcher;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_json) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            return exit_codes::UNEXPECTED_FAILURE;
        }
    };

    let launcher = Launcher::new();

    rt.block_on(async {
        match cli::dispatch(&launcher, cli.command).await {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                categorize_error(&e)
            }
        }
    })
}

/// Categorize an error into the appropriate exit code
fn categorize_error(e: &anyhow::Error) -> i32 {
    let msg = e.to_string().to_lowercase();

    if msg.contains("not found") || msg.contains("cannot find") {
        exit_codes::LAUNCHER_MISSING
    } else if msg.contains("timed out") {
        exit_codes::CLI_TIMEOUT
    } else if msg.contains("unparsable") {
        exit_codes::PARSE_ERROR
    } else {
        exit_codes::UNEXPECTED_FAILURE
    }
}
