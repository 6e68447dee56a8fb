use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning the operator's target argument into hosts.
///
/// Every variant is fatal: a bad target list is operator error, so the run
/// stops before any host is contacted.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("no target given")]
    Empty,

    #[error("invalid IP address '{0}'")]
    InvalidAddress(String),

    #[error("invalid CIDR block '{block}': {reason}")]
    InvalidCidr { block: String, reason: String },

    #[error("only IPv4 blocks can be expanded, got '{0}'")]
    UnsupportedRange(String),

    #[error("unable to read target list {}: {source}", path.display())]
    ListFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("share name must not be empty")]
    EmptyShare,

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("retrieval chance must be a finite number, got {0}")]
    InvalidChance(f64),
}
