//! In-memory file server used to drive whole runs without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sharecrawl_common::config::ScanConfig;
use sharecrawl_common::pattern::PatternSet;
use sharecrawl_core::label::LabelResolver;
use sharecrawl_core::sampler::ChanceSampler;
use sharecrawl_core::session::{Connector, DirectoryEntry, Session, SessionError, SessionParams};
use sharecrawl_core::TaskContext;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub type Tree = HashMap<String, Vec<DirectoryEntry>>;

/// Hosts map to folder trees; a host with no tree refuses connections.
#[derive(Default)]
pub struct FakeServer {
    trees: HashMap<String, Tree>,
    hold: Duration,
    pub connects: Mutex<Vec<String>>,
    pub listed: Mutex<Vec<(String, String)>>,
    pub retrieved: Mutex<Vec<(String, String)>>,
    pub labels: Mutex<Vec<String>>,
    open: AtomicUsize,
    pub peak_open: AtomicUsize,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: &str, tree: Tree) -> Self {
        self.trees.insert(host.to_string(), tree);
        self
    }

    /// How long each session stays open after connecting.
    pub fn hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    pub fn listed_on(&self, host: &str) -> Vec<String> {
        self.listed
            .lock()
            .unwrap()
            .iter()
            .filter(|(h, _)| h == host)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn retrieved_on(&self, host: &str) -> Vec<String> {
        self.retrieved
            .lock()
            .unwrap()
            .iter()
            .filter(|(h, _)| h == host)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

pub fn tree(dirs: &[(&str, Vec<DirectoryEntry>)]) -> Tree {
    dirs.iter()
        .map(|(path, entries)| (path.to_string(), entries.clone()))
        .collect()
}

pub fn file(name: &str) -> DirectoryEntry {
    DirectoryEntry::file(name)
}

pub fn dir(name: &str) -> DirectoryEntry {
    DirectoryEntry::directory(name)
}

#[derive(Clone)]
pub struct FakeConnector(pub Arc<FakeServer>);

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, params: &SessionParams) -> Result<Box<dyn Session>, SessionError> {
        let server = &self.0;
        server.connects.lock().unwrap().push(params.host.clone());
        server.labels.lock().unwrap().push(params.remote_label.clone());

        let Some(tree) = server.trees.get(&params.host) else {
            return Err(SessionError::Connect {
                host: params.host.clone(),
                port: params.port,
                source: std::io::ErrorKind::ConnectionRefused.into(),
            });
        };

        let open = server.open.fetch_add(1, Ordering::SeqCst) + 1;
        server.peak_open.fetch_max(open, Ordering::SeqCst);
        tokio::time::sleep(server.hold).await;

        Ok(Box::new(FakeSession {
            host: params.host.clone(),
            tree: tree.clone(),
            server: Arc::clone(server),
        }))
    }
}

struct FakeSession {
    host: String,
    tree: Tree,
    server: Arc<FakeServer>,
}

#[async_trait]
impl Session for FakeSession {
    async fn list_directory(
        &mut self,
        _share: &str,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, SessionError> {
        self.server
            .listed
            .lock()
            .unwrap()
            .push((self.host.clone(), path.to_string()));
        self.tree
            .get(path)
            .cloned()
            .ok_or_else(|| SessionError::Protocol(format!("STATUS_ACCESS_DENIED {path}")))
    }

    async fn retrieve_file(
        &mut self,
        _share: &str,
        path: &str,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, SessionError> {
        self.server
            .retrieved
            .lock()
            .unwrap()
            .push((self.host.clone(), path.to_string()));
        sink.write_all(b"data").await?;
        Ok(4)
    }

    async fn close(&mut self) {
        self.server.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Always answers with the same label.
pub struct FixedLabel(pub &'static str);

#[async_trait]
impl LabelResolver for FixedLabel {
    async fn resolve_label(&self, _host: &str) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

/// Knows no host at all.
pub struct NoLabels;

#[async_trait]
impl LabelResolver for NoLabels {
    async fn resolve_label(&self, host: &str) -> anyhow::Result<String> {
        anyhow::bail!("no label for {host}")
    }
}

pub fn context(
    config: ScanConfig,
    patterns: PatternSet,
    connector: Arc<dyn Connector>,
    resolver: Arc<dyn LabelResolver>,
) -> TaskContext {
    TaskContext {
        config: Arc::new(config),
        patterns: Arc::new(patterns),
        connector,
        resolver,
        sampler: Arc::new(ChanceSampler),
        local_label: "TESTBOX".to_string(),
    }
}
