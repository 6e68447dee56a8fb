//! # Scan Target Model
//!
//! Turns the operator's target argument into the ordered list of hosts to
//! spider. The argument can be:
//! * A path to a list file, one entry per line. Lines holding a `/` are CIDR
//!   blocks; every other non-empty line is taken verbatim as a host.
//! * A CIDR block (e.g. `192.168.1.0/24`), expanded to its usable hosts.
//! * A single IP address.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::TargetError;
use crate::network::range;
use crate::success;

/// One host to be spidered. Hosts from list files are not validated, so this
/// holds the address as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    host: String,
}

impl Target {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl From<IpAddr> for Target {
    fn from(addr: IpAddr) -> Self {
        Self::new(addr.to_string())
    }
}

impl From<Ipv4Addr> for Target {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(addr.to_string())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

/// The classified form of a target argument, before expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetSpec {
    /// A file listing hosts and blocks.
    List { path: PathBuf },
    /// A CIDR block.
    Block { network: Ipv4Network },
    /// A single host.
    Host { target_addr: IpAddr },
}

impl FromStr for TargetSpec {
    type Err = TargetError;

    /// Classifies a target argument. An existing file wins over everything
    /// else, then anything with a `/` is a block, then a bare address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TargetError::Empty);
        }

        let path = Path::new(s);
        if path.is_file() {
            return Ok(TargetSpec::List {
                path: path.to_path_buf(),
            });
        }

        if s.contains('/') {
            let network = parse_cidr(s)?;
            return Ok(TargetSpec::Block { network });
        }

        let target_addr = s
            .parse::<IpAddr>()
            .map_err(|_| TargetError::InvalidAddress(s.to_string()))?;
        Ok(TargetSpec::Host { target_addr })
    }
}

impl TargetSpec {
    /// Flattens the target into hosts, keeping the order they were given in.
    pub fn expand(self) -> Result<Vec<Target>, TargetError> {
        match self {
            TargetSpec::List { path } => read_list(&path),
            TargetSpec::Block { network } => Ok(expand_block(network)),
            TargetSpec::Host { target_addr } => Ok(vec![Target::from(target_addr)]),
        }
    }
}

/// Resolves a target argument into the hosts to scan.
pub fn resolve(spec: &str) -> Result<Vec<Target>, TargetError> {
    let targets = spec.parse::<TargetSpec>()?.expand()?;

    let len: usize = targets.len();
    let unit: &str = if len == 1 { "target has been" } else { "targets have been" };
    success!("{len} {unit} parsed successfully");

    Ok(targets)
}

fn read_list(path: &Path) -> Result<Vec<Target>, TargetError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TargetError::ListFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut targets = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains('/') {
            targets.extend(expand_block(parse_cidr(line)?));
        } else {
            targets.push(Target::new(line));
        }
    }

    Ok(targets)
}

fn expand_block(network: Ipv4Network) -> Vec<Target> {
    range::host_range(network)
        .to_iter()
        .map(Target::from)
        .collect()
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr(s: &str) -> Result<Ipv4Network, TargetError> {
    let invalid = |reason: String| TargetError::InvalidCidr {
        block: s.to_string(),
        reason,
    };

    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Err(invalid("missing prefix".to_string()));
    };

    let addr = ip_str
        .trim()
        .parse::<IpAddr>()
        .map_err(|e| invalid(format!("invalid IP '{ip_str}': {e}")))?;

    let IpAddr::V4(ipv4_addr) = addr else {
        return Err(TargetError::UnsupportedRange(s.to_string()));
    };

    let prefix = prefix_str
        .trim()
        .parse::<u8>()
        .map_err(|e| invalid(format!("invalid prefix '{prefix_str}': {e}")))?;

    Ipv4Network::new(ipv4_addr, prefix).map_err(|e| invalid(e.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
