//! Core data models: invocation outcomes, distribution rows, path mapping

mod distro;
mod outcome;
pub mod paths;

pub use distro::{parse_distro_table, parse_online_list, DistroInfo};
pub use outcome::{CommandOutcome, BRIDGE_FAILURE_CODE};
