//! Depth-limited traversal of one share over one session.
//!
//! The walk is depth-first in listing order. Every listed folder gets the
//! same treatment: each plain file is offered to the [`Sampler`], every name
//! is checked against the [`PatternSet`], and subfolders are queued while the
//! depth budget lasts.
//!
//! The remote listing is treated as a tree. `.` and `..` are never followed
//! and the depth budget is a hard ceiling, but a server that presents a truly
//! cyclic folder graph is not detected beyond that ceiling.

use std::ops::AddAssign;
use std::path::Path;
use std::time::Duration;

use sharecrawl_common::{hit, pattern::PatternSet, success};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::sampler::Sampler;
use crate::session::{DirectoryEntry, Session, SessionError};

/// Counters for one walk. No paths are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub directories_listed: u64,
    pub listing_failures: u64,
    pub matches: u64,
    pub files_collected: u64,
    pub retrieval_failures: u64,
}

impl AddAssign for WalkStats {
    fn add_assign(&mut self, other: Self) {
        self.directories_listed += other.directories_listed;
        self.listing_failures += other.listing_failures;
        self.matches += other.matches;
        self.files_collected += other.files_collected;
        self.retrieval_failures += other.retrieval_failures;
    }
}

pub struct Walker<'a> {
    session: &'a mut dyn Session,
    host: &'a str,
    share: &'a str,
    patterns: &'a PatternSet,
    sampler: &'a dyn Sampler,
    chance: f64,
    delay: Duration,
    scratch_dir: Option<&'a Path>,
    stats: WalkStats,
}

impl<'a> Walker<'a> {
    pub fn new(
        session: &'a mut dyn Session,
        host: &'a str,
        share: &'a str,
        patterns: &'a PatternSet,
        sampler: &'a dyn Sampler,
    ) -> Self {
        Self {
            session,
            host,
            share,
            patterns,
            sampler,
            chance: 0.0,
            delay: Duration::ZERO,
            scratch_dir: None,
            stats: WalkStats::default(),
        }
    }

    /// Probability of retrieving each eligible file.
    pub fn chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }

    /// Pause taken before every listing and retrieval request.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Directory scratch files are created in. `None` uses the system temp
    /// directory.
    pub fn scratch_dir(mut self, dir: Option<&'a Path>) -> Self {
        self.scratch_dir = dir;
        self
    }

    /// Walks from `start`, descending at most `depth` levels below it.
    ///
    /// A depth of zero lists `start` once and nothing else.
    pub async fn walk(mut self, start: &str, depth: u32) -> WalkStats {
        let mut pending: Vec<(String, u32)> = vec![(normalize(start), depth)];

        while let Some((path, budget)) = pending.pop() {
            let Some(entries) = self.list(&path).await else {
                continue;
            };

            let mut subdirs: Vec<String> = Vec::new();
            for entry in &entries {
                self.sample(&path, entry).await;
                self.report_match(&path, entry);

                if budget > 0 && entry.is_directory && !entry.is_special() {
                    subdirs.push(join(&path, &entry.name));
                }
            }

            // Reversed so the first subfolder is popped next.
            pending.extend(subdirs.into_iter().rev().map(|dir| (dir, budget - 1)));
        }

        self.stats
    }

    async fn list(&mut self, path: &str) -> Option<Vec<DirectoryEntry>> {
        pause(self.delay).await;
        match self.session.list_directory(self.share, path).await {
            Ok(entries) => {
                self.stats.directories_listed += 1;
                debug!("Listed {} ({} entries)", self.display(path), entries.len());
                Some(entries)
            }
            Err(e) => {
                self.stats.listing_failures += 1;
                warn!("{} [Unable to read]: {}", self.display(path), e);
                None
            }
        }
    }

    async fn sample(&mut self, dir: &str, entry: &DirectoryEntry) {
        if entry.is_directory || entry.is_hidden() {
            return;
        }
        if !self.sampler.should_retrieve(self.chance) {
            return;
        }

        let path = join(dir, &entry.name);
        info!("Collecting {}", self.display(&path));
        pause(self.delay).await;

        match self.retrieve(&path).await {
            Ok(bytes) => {
                self.stats.files_collected += 1;
                success!("Collected {} ({} bytes)", self.display(&path), bytes);
            }
            Err(e) => {
                self.stats.retrieval_failures += 1;
                warn!("Unable to retrieve {}: {}", self.display(&path), e);
            }
        }
    }

    /// Streams the file into a scratch file that is removed when this returns,
    /// whatever the outcome.
    async fn retrieve(&mut self, path: &str) -> Result<u64, SessionError> {
        let scratch = match self.scratch_dir {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };
        let mut sink = tokio::fs::File::from_std(scratch.reopen()?);

        let bytes = self.session.retrieve_file(self.share, path, &mut sink).await?;
        sink.flush().await?;
        Ok(bytes)
    }

    fn report_match(&mut self, dir: &str, entry: &DirectoryEntry) {
        if entry.is_special() || !self.patterns.matches(&entry.name) {
            return;
        }

        self.stats.matches += 1;
        let path = self.display(&join(dir, &entry.name));
        if entry.is_directory {
            hit!("{path} [dir]");
        } else {
            hit!("{path}");
        }
    }

    fn display(&self, path: &str) -> String {
        format!("//{}/{}{}", self.host, self.share, path)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Gives a remote path one leading slash and no trailing one.
fn normalize(path: &str) -> String {
    let parts: Vec<&str> = path
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .collect();
    format!("/{}", parts.join("/"))
}

fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
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
