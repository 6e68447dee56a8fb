pub mod spider;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser};
use sharecrawl_common::config::{
    Credentials, DEFAULT_PORT, DEFAULT_SUBFOLDER, DEFAULT_TIMEOUT, ScanConfig,
};
use sharecrawl_common::pattern::PatternSet;
use sharecrawl_core::label::DEFAULT_HOSTS_FILE;

#[derive(Parser, Debug)]
#[command(name = "sharecrawl", version)]
#[command(about = "Spider file shares across many hosts, looking for sensitive files.")]
#[command(after_help = "EXAMPLES:\n    \
    sharecrawl 10.0.0.0/24 -s public -p password -r 3 -t 8\n    \
    sharecrawl hosts.txt -s C$ -u admin -w 'P@ss' -d CORP -P keywords.txt -c 0.05\n    \
    sharecrawl 192.168.1.20 -s data -f /users -p .kdbx --delay 2")]
pub struct CommandLine {
    /// IP address, IPv4 CIDR block, or a file listing either
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Share to spider
    #[arg(short, long)]
    pub share: String,

    /// Folder within the share to start from
    #[arg(short = 'f', long, default_value = DEFAULT_SUBFOLDER)]
    pub subfolder: String,

    /// Keyword to look for in filenames, e.g. password. Empty reports every file
    #[arg(short, long, default_value = "", hide_default_value = true)]
    pub pattern: String,

    /// File of keywords, one per line
    #[arg(short = 'P', long, value_name = "FILE")]
    pub pattern_file: Option<PathBuf>,

    /// User to authenticate as
    #[arg(short, long, default_value = "")]
    pub user: String,

    /// Password for the user
    #[arg(short = 'w', long, default_value = "", hide_default_value = true)]
    pub password: String,

    /// Domain of the user
    #[arg(short, long, default_value = "")]
    pub domain: String,

    /// Levels of subfolders to descend into; 0 lists only the start folder
    #[arg(short = 'r', long = "recursive", value_name = "DEPTH", default_value_t = 0)]
    pub depth: u32,

    /// Hosts spidered at the same time
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: u16,

    /// Probability (0.0 to 1.0) of collecting any one file encountered
    #[arg(short, long, default_value_t = 0.0)]
    pub chance: f64,

    /// Seconds to wait before each request, per host
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
    pub delay: f64,

    /// Port sessions are opened on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Connect timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Hosts table used to name remote machines
    #[arg(long, value_name = "FILE", default_value = DEFAULT_HOSTS_FILE)]
    pub names: PathBuf,

    /// Directory holding mounted shares as <host>/<share>
    #[arg(long, value_name = "DIR", default_value = "/mnt/sharecrawl")]
    pub mount_root: PathBuf,

    /// Directory retrieved files are staged in [default: system temp dir]
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Skip the TCP reachability check before opening a mount
    #[arg(long)]
    pub skip_probe: bool,

    /// Seed for reproducible file sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn patterns(&self) -> PatternSet {
        PatternSet::load(&self.pattern, self.pattern_file.as_deref())
    }

    pub fn scan_config(&self) -> anyhow::Result<ScanConfig> {
        let delay = Duration::try_from_secs_f64(self.delay)
            .with_context(|| format!("invalid delay: {}", self.delay))?;

        let config = ScanConfig {
            share: self.share.clone(),
            subfolder: self.subfolder.clone(),
            credentials: Credentials {
                user: self.user.clone(),
                password: self.password.clone(),
                domain: self.domain.clone(),
            },
            depth: self.depth,
            max_concurrency: usize::from(self.threads),
            chance: self.chance,
            delay,
            port: self.port,
            timeout: Duration::from_secs(self.timeout),
            scratch_dir: self.scratch_dir.clone(),
        };
        config.validate()?;

        Ok(config)
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
