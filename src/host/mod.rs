//! Host-side launcher bridge: argument construction and process execution

pub mod invocation;
pub mod launcher;

pub use invocation::{ExportFormat, InstallOptions, Invocation, RunOptions, ShellType};
pub use launcher::{Launcher, LAUNCHER_PROGRAM};
