//! Guest file and directory operations over the launcher bridge

mod listing;
mod manager;
mod quote;

use thiserror::Error;

pub use listing::DirEntry;
pub use manager::FileManager;
pub use quote::single_quote;

/// Failure of one guest file operation.
///
/// Either the guest command exited nonzero (stderr carried verbatim), or it
/// succeeded but printed something the structured parsers could not use.
#[derive(Debug, Error)]
pub enum FsError {
    /// The guest command failed; the payload is its stderr, untranslated.
    #[error("{0}")]
    Command(String),
    /// The guest command succeeded but its output was unparsable.
    #[error("unparsable output: {0}")]
    Parse(String),
}
