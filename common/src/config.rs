use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Port the session is opened on unless overridden.
pub const DEFAULT_PORT: u16 = 139;
/// Connect timeout unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Folder the walk starts from when none is given.
pub const DEFAULT_SUBFOLDER: &str = "/";

/// Account used to open sessions. Empty fields mean an anonymous session.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    pub domain: String,
}

impl Credentials {
    pub fn is_anonymous(&self) -> bool {
        self.user.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("domain", &self.domain)
            .finish()
    }
}

/// Settings shared read-only by every traversal task of a run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub share: String,
    pub subfolder: String,
    pub credentials: Credentials,
    /// Levels the walker may descend below `subfolder`. Zero lists only the
    /// start folder.
    pub depth: u32,
    /// Ceiling on simultaneously open sessions.
    pub max_concurrency: usize,
    /// Probability of retrieving any one eligible file.
    pub chance: f64,
    /// Pause before every listing and retrieval request.
    pub delay: Duration,
    pub port: u16,
    pub timeout: Duration,
    /// Where retrieved files are staged before being discarded. The system
    /// temp directory when unset.
    pub scratch_dir: Option<PathBuf>,
}

impl ScanConfig {
    pub fn new(share: impl Into<String>) -> Self {
        Self {
            share: share.into(),
            subfolder: DEFAULT_SUBFOLDER.to_string(),
            credentials: Credentials::default(),
            depth: 0,
            max_concurrency: 1,
            chance: 0.0,
            delay: Duration::ZERO,
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            scratch_dir: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.share.trim().is_empty() {
            return Err(ConfigError::EmptyShare);
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if !self.chance.is_finite() {
            return Err(ConfigError::InvalidChance(self.chance));
        }
        Ok(())
    }
}
