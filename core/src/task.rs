//! The unit of concurrent work: one host, from label lookup to session close.

use std::sync::Arc;

use sharecrawl_common::config::ScanConfig;
use sharecrawl_common::network::target::Target;
use sharecrawl_common::pattern::PatternSet;
use sharecrawl_common::success;
use tracing::{error, info};

use crate::label::{self, LabelResolver};
use crate::sampler::Sampler;
use crate::session::{Connector, SessionParams};
use crate::walker::{WalkStats, Walker};

/// How a host's task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutcome {
    /// A session was opened and the walk ran to the end.
    Completed(WalkStats),
    /// No session could be opened; the reason as logged.
    Unreachable(String),
}

/// What every task of a run shares. Cloning is cheap.
#[derive(Clone)]
pub struct TaskContext {
    pub config: Arc<ScanConfig>,
    pub patterns: Arc<PatternSet>,
    pub connector: Arc<dyn Connector>,
    pub resolver: Arc<dyn LabelResolver>,
    pub sampler: Arc<dyn Sampler>,
    pub local_label: String,
}

impl TaskContext {
    /// Binds a host to the shared settings.
    pub fn task(&self, target: Target) -> TraversalTask {
        TraversalTask {
            target,
            ctx: self.clone(),
        }
    }
}

pub struct TraversalTask {
    target: Target,
    ctx: TaskContext,
}

impl TraversalTask {
    /// Runs to a terminal state. Failures are logged here and never escape.
    pub async fn run(self) -> HostOutcome {
        let host = self.target.host();
        let cfg = &self.ctx.config;
        info!("Starting task for {host}");

        let remote_label = label::label_or_default(self.ctx.resolver.as_ref(), host).await;
        let params = SessionParams {
            host: host.to_string(),
            remote_label,
            local_label: self.ctx.local_label.clone(),
            port: cfg.port,
            timeout: cfg.timeout,
            credentials: cfg.credentials.clone(),
        };

        let mut session = match self.ctx.connector.connect(&params).await {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to connect to {host}: {e}");
                return HostOutcome::Unreachable(e.to_string());
            }
        };
        success!(
            "Connected to {host} ({}), spidering {}{}",
            params.remote_label,
            cfg.share,
            cfg.subfolder
        );

        let stats = Walker::new(
            session.as_mut(),
            host,
            &cfg.share,
            &self.ctx.patterns,
            self.ctx.sampler.as_ref(),
        )
        .chance(cfg.chance)
        .delay(cfg.delay)
        .scratch_dir(cfg.scratch_dir.as_deref())
        .walk(&cfg.subfolder, cfg.depth)
        .await;

        session.close().await;
        info!("Finished {host}");

        HostOutcome::Completed(stats)
    }
}
