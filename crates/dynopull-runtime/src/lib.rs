//! OS-level adapters for dynopull.
//!
//! - [`TokioCommandRunner`] implements the `CommandRunner` port with
//!   `tokio::process`
//! - [`ZipArchiver`] implements the `Archiver` port with the `zip` crate
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod archive;
mod process;

pub use archive::ZipArchiver;
pub use process::TokioCommandRunner;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
