//! Per-domain audit results, as handed to the reporting layer.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

pub const UNKNOWN: &str = "unknown";

/// Outcome of resolving a domain.
///
/// `ipv4` is `None` when neither A nor CNAME lookups produced an address.
/// `host` is always the domain as written in the inventory, never the CNAME target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub ipv4: Option<Ipv4Addr>,
    pub host: String,
}

impl ResolvedAddress {
    pub fn resolved(ipv4: Ipv4Addr, host: impl Into<String>) -> Self {
        Self {
            ipv4: Some(ipv4),
            host: host.into(),
        }
    }

    pub fn unresolved(host: impl Into<String>) -> Self {
        Self {
            ipv4: None,
            host: host.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.ipv4.is_some()
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ipv4 {
            Some(ip) => write!(f, "{ip}"),
            None => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Aws,
    Gcp,
    Azure,
    Unknown,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provider::Aws => "AWS",
            Provider::Gcp => "GCP",
            Provider::Azure => "Azure",
            Provider::Unknown => UNKNOWN,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub provider: Provider,
    pub service: String,
}

impl Attribution {
    pub fn new(provider: Provider, service: impl Into<String>) -> Self {
        Self {
            provider,
            service: service.into(),
        }
    }

    /// A provider match that carries no service granularity.
    pub fn provider_only(provider: Provider) -> Self {
        Self::new(provider, UNKNOWN)
    }

    pub fn unknown() -> Self {
        Self::provider_only(Provider::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
    Closed,
}

impl From<bool> for PortState {
    fn from(open: bool) -> Self {
        if open { PortState::Open } else { PortState::Closed }
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortState::Open => "open",
            PortState::Closed => "-",
        })
    }
}

/// Label → state, one entry per label declared for the domain.
pub type PortCheckResult = BTreeMap<String, PortState>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Deactive,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Active => "active",
            Status::Deactive => "deactive",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResult {
    pub name: String,
    pub reachable: bool,
    pub address: ResolvedAddress,
    pub attribution: Attribution,
    pub smtp_open: bool,
    pub ports: PortCheckResult,
}

impl DomainResult {
    pub fn status(&self) -> Status {
        if self.reachable {
            Status::Active
        } else {
            Status::Deactive
        }
    }

    pub fn smtp(&self) -> PortState {
        PortState::from(self.smtp_open)
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
