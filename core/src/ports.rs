//! TCP connect scan over the named ports of one domain.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use cloudscout_common::record::{PortCheckResult, PortState};
use tokio::net::TcpStream;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::debug;

pub struct PortScanner {
    connect_timeout: Duration,
}

impl PortScanner {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// Connects to every port concurrently. Without an address every label is closed.
    pub async fn scan(&self, ip: Option<Ipv4Addr>, ports: &BTreeMap<String, u16>) -> PortCheckResult {
        let Some(ip) = ip else {
            debug!("No address to scan, marking {} ports closed", ports.len());
            return ports
                .keys()
                .map(|label| (label.clone(), PortState::Closed))
                .collect();
        };

        let mut probes: JoinSet<(String, PortState)> = JoinSet::new();
        for (label, port) in ports {
            let label = label.clone();
            let addr = SocketAddr::new(IpAddr::V4(ip), *port);
            let bound = self.connect_timeout;
            probes.spawn(async move { (label, connect_probe(addr, bound).await) });
        }

        let mut results = PortCheckResult::new();
        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((label, state)) => {
                    results.insert(label, state);
                }
                Err(e) => debug!("Port probe task failed: {e}"),
            }
        }

        // A panicked probe still owes its label an entry.
        for label in ports.keys() {
            results.entry(label.clone()).or_insert(PortState::Closed);
        }
        results
    }
}

pub async fn connect_probe(addr: SocketAddr, bound: Duration) -> PortState {
    match timeout(bound, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => PortState::Open,
        Ok(Err(e)) => {
            debug!("{addr} closed: {e}");
            PortState::Closed
        }
        Err(_elapsed) => {
            debug!("{addr} closed: no answer within {bound:?}");
            PortState::Closed
        }
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
