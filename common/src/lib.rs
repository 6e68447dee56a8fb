//! # sharecrawl-common
//!
//! Plain data shared by the engine and the command line: scan targets and the
//! ranges they expand from, the keyword set filenames are matched against,
//! the immutable scan configuration, and the logging helpers every crate in
//! the workspace writes through.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod pattern;

#[doc(hidden)]
pub use tracing;
