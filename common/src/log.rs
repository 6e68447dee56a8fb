//! Logging targets and helper macros.
//!
//! Everything the tool prints is a `tracing` event. The terminal formatter in
//! the CLI keys off these targets to decide how a line is decorated.

/// Raw terminal output, written without a level symbol.
pub const PRINT_TARGET: &str = "sharecrawl::print";
/// Positive outcomes (connected, collected, finished).
pub const SUCCESS_TARGET: &str = "sharecrawl::success";
/// Filenames that matched the keyword set.
pub const HIT_TARGET: &str = "sharecrawl::hit";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "sharecrawl::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! hit {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "sharecrawl::hit", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

/// Emits a line on the raw print target.
pub fn print(msg: &str) {
    tracing::info!(target: "sharecrawl::print", raw_msg = msg);
}
