//! # sharecrawl-core
//!
//! The spidering engine. Given hosts, a share name and a keyword set it opens
//! one session per host, walks the share depth-first,
//! reports filenames that match and samples files for retrieval.
//!
//! ## Layout
//! * **[`session`]**: the seam to whatever actually speaks to the remote file
//!   server. The engine only ever calls through [`session::Connector`] and
//!   [`session::Session`].
//! * **[`label`]**: host-label lookup used to fill in session parameters.
//! * **[`sampler`]**: per-file retrieval decision.
//! * **[`walker`]**: depth-limited traversal of one share on one session.
//! * **[`task`]**: the unit of work for one host, from label lookup to close.
//! * **[`scheduler`]**: admits tasks under a global concurrency ceiling and
//!   waits for all of them.
//!
//! Failures stay where they happen. An unreachable host ends only its own task
//! and an unreadable folder ends only its own branch.

pub mod label;
pub mod network;
pub mod sampler;
pub mod scheduler;
pub mod session;
pub mod task;
pub mod walker;

pub use scheduler::{Scheduler, ScanSummary};
pub use task::{HostOutcome, TaskContext, TraversalTask};
pub use walker::{WalkStats, Walker};
