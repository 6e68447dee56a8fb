//! The boundary between the engine and the remote file server.
//!
//! Nothing in the engine knows how a session is negotiated or how bytes travel
//! on the wire. A [`Connector`] opens a [`Session`] for one host, and the
//! session lists folders and streams files into a local sink. Each traversal
//! task owns its session exclusively; sessions are never shared or pooled.

use std::time::Duration;

use async_trait::async_trait;
use sharecrawl_common::config::Credentials;
use thiserror::Error;
use tokio::io::AsyncWrite;

pub mod mounted;

pub use mounted::MountedShareConnector;

/// One row of a folder listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
        }
    }

    /// The `.` and `..` self/parent links some servers include in listings.
    pub fn is_special(&self) -> bool {
        self.name == "." || self.name == ".."
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Everything a connector needs to open a session to one host.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub host: String,
    /// Name the remote side is addressed by during session setup.
    pub remote_label: String,
    /// Name this machine introduces itself with.
    pub local_label: String,
    pub port: u16,
    pub timeout: Duration,
    pub credentials: Credentials,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connection to {host}:{port} timed out")]
    Timeout { host: String, port: u16 },

    #[error("unable to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("no share mount for {host} under {root}")]
    NotMounted { host: String, root: String },

    #[error("invalid remote path '{0}'")]
    InvalidPath(String),

    #[error("unable to list {path}: {source}")]
    List {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to retrieve {path}: {source}")]
    Retrieve {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("local scratch file failed: {0}")]
    Scratch(#[from] std::io::Error),

    #[error("{0}")]
    Protocol(String),
}

/// Opens sessions. Shared by every task of a run.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, params: &SessionParams) -> Result<Box<dyn Session>, SessionError>;
}

/// An open, authenticated session to one host.
#[async_trait]
pub trait Session: Send {
    /// Lists `path` within `share`.
    async fn list_directory(
        &mut self,
        share: &str,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, SessionError>;

    /// Streams the file at `path` within `share` into `sink`, returning the
    /// number of bytes written.
    async fn retrieve_file(
        &mut self,
        share: &str,
        path: &str,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, SessionError>;

    async fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_and_hidden_entries() {
        assert!(DirectoryEntry::directory(".").is_special());
        assert!(DirectoryEntry::directory("..").is_special());
        assert!(!DirectoryEntry::directory("...").is_special());

        assert!(DirectoryEntry::file(".secret").is_hidden());
        assert!(!DirectoryEntry::file("secret.").is_hidden());
    }
}
