//! Sessions over shares the operator has already mounted locally.
//!
//! Shares are expected at `<root>/<host>/<share>`, where `<host>` is either
//! the remote label or the address being scanned. Authentication happened
//! when the share was mounted, so the credentials in [`SessionParams`] are
//! not used here.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWrite;
use tracing::debug;

use super::{Connector, DirectoryEntry, Session, SessionError, SessionParams};
use crate::network::tcp;

pub struct MountedShareConnector {
    root: PathBuf,
    probe: bool,
}

impl MountedShareConnector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            probe: true,
        }
    }

    /// Skips the TCP reachability check before opening the mount.
    pub fn without_probe(mut self) -> Self {
        self.probe = false;
        self
    }

    async fn host_dir(&self, params: &SessionParams) -> Option<PathBuf> {
        for name in [params.remote_label.as_str(), params.host.as_str()] {
            if name.is_empty() || !is_plain_name(name) {
                continue;
            }
            let candidate = self.root.join(name);
            if tokio::fs::metadata(&candidate)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false)
            {
                return Some(candidate);
            }
        }
        None
    }
}

#[async_trait]
impl Connector for MountedShareConnector {
    async fn connect(&self, params: &SessionParams) -> Result<Box<dyn Session>, SessionError> {
        if self.probe {
            let addr = tcp::probe(&params.host, params.port, params.timeout).await?;
            debug!("{} answered on {}", params.host, addr);
        }

        if !params.credentials.is_anonymous() {
            debug!(
                "Mounted shares carry their own credentials, ignoring user {}",
                params.credentials.user
            );
        }

        let host_root = self
            .host_dir(params)
            .await
            .ok_or_else(|| SessionError::NotMounted {
                host: params.host.clone(),
                root: self.root.display().to_string(),
            })?;

        debug!("Opened {} as {}", params.host, host_root.display());
        Ok(Box::new(MountedSession { host_root }))
    }
}

struct MountedSession {
    host_root: PathBuf,
}

impl MountedSession {
    /// Maps a share and remote path onto the mount, refusing anything that
    /// would climb out of the share.
    fn local_path(&self, share: &str, path: &str) -> Result<PathBuf, SessionError> {
        if share.is_empty() || !is_plain_name(share) {
            return Err(SessionError::InvalidPath(share.to_string()));
        }

        let mut local = self.host_root.join(share);
        for part in path.split(['/', '\\']) {
            match part {
                "" | "." => continue,
                ".." => return Err(SessionError::InvalidPath(path.to_string())),
                name => local.push(name),
            }
        }
        Ok(local)
    }
}

#[async_trait]
impl Session for MountedSession {
    async fn list_directory(
        &mut self,
        share: &str,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, SessionError> {
        let dir = self.local_path(share, path)?;
        let list_err = |source: std::io::Error| SessionError::List {
            path: path.to_string(),
            source,
        };

        let mut reader = tokio::fs::read_dir(&dir).await.map_err(list_err)?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(list_err)? {
            // Symlinks are not followed, so a link back up the tree is a file.
            let is_directory = entry.file_type().await.map_err(list_err)?.is_dir();
            entries.push(DirectoryEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn retrieve_file(
        &mut self,
        share: &str,
        path: &str,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, SessionError> {
        let file_path = self.local_path(share, path)?;
        let retrieve_err = |source: std::io::Error| SessionError::Retrieve {
            path: path.to_string(),
            source,
        };

        let mut file = tokio::fs::File::open(&file_path).await.map_err(retrieve_err)?;
        tokio::io::copy(&mut file, sink).await.map_err(retrieve_err)
    }

    async fn close(&mut self) {
        debug!("Closed {}", self.host_root.display());
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
