//! Host-label lookup.
//!
//! Session setup wants a name for the remote machine and one for this
//! machine. Neither lookup is allowed to stop a scan: a host without a known
//! name is addressed by [`DEFAULT_REMOTE_LABEL`].

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

/// Wildcard name file servers answer to when their own name is unknown.
pub const DEFAULT_REMOTE_LABEL: &str = "*SMBSERVER";
/// Name this machine introduces itself with when it has none.
pub const DEFAULT_LOCAL_LABEL: &str = "DESKTOP";
/// Hosts table consulted when no other is given.
pub const DEFAULT_HOSTS_FILE: &str = "/etc/hosts";

#[async_trait]
pub trait LabelResolver: Send + Sync {
    async fn resolve_label(&self, host: &str) -> anyhow::Result<String>;
}

/// Looks up `host`, falling back to [`DEFAULT_REMOTE_LABEL`].
pub async fn label_or_default(resolver: &dyn LabelResolver, host: &str) -> String {
    match resolver.resolve_label(host).await {
        Ok(label) if !label.is_empty() => label,
        Ok(_) => DEFAULT_REMOTE_LABEL.to_string(),
        Err(e) => {
            debug!("No label for {host} ({e}), using {DEFAULT_REMOTE_LABEL}");
            DEFAULT_REMOTE_LABEL.to_string()
        }
    }
}

/// The name of the machine running the scan.
pub fn local_label() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCAL_LABEL.to_string())
}

/// Resolves labels from a hosts-format table (`address name [aliases...]`).
#[derive(Debug, Default, Clone)]
pub struct HostsFileResolver {
    names: HashMap<String, String>,
}

impl HostsFileResolver {
    /// Reads the table at `path`. An unreadable table resolves nothing.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                debug!("Unable to read hosts table {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Self {
        let mut names = HashMap::new();
        for line in contents.lines() {
            let line = line.split('#').next().unwrap_or_default();
            let mut fields = line.split_whitespace();
            if let (Some(addr), Some(name)) = (fields.next(), fields.next()) {
                names
                    .entry(addr.to_string())
                    .or_insert_with(|| name.to_string());
            }
        }
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[async_trait]
impl LabelResolver for HostsFileResolver {
    async fn resolve_label(&self, host: &str) -> anyhow::Result<String> {
        self.names
            .get(host)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{host} is not in the hosts table"))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
