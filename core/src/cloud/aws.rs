//! The AWS `ip-ranges.json` document.

use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use super::DatasetError;

/// Tag AWS uses for ranges shared by every service.
const GENERIC_TAG: &str = "AMAZON";
const SHARED_LABEL: &str = "shared";

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    prefixes: Vec<Value>,
}

#[derive(Deserialize)]
struct RawPrefix {
    ip_prefix: String,
    service: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsPrefix {
    pub network: Ipv4Network,
    pub service: String,
}

#[derive(Debug, Clone, Default)]
pub struct AwsRanges {
    prefixes: Vec<AwsPrefix>,
}

impl AwsRanges {
    /// Decodes the document, skipping every entry that lacks a string
    /// `ip_prefix`/`service` pair or whose prefix is not an IPv4 CIDR.
    pub fn from_slice(body: &[u8]) -> Result<Self, DatasetError> {
        let document: Document = serde_json::from_slice(body)?;
        let prefixes = document
            .prefixes
            .into_iter()
            .filter_map(|entry| {
                let raw: RawPrefix = serde_json::from_value(entry).ok()?;
                match raw.ip_prefix.parse::<Ipv4Network>() {
                    Ok(network) => Some(AwsPrefix {
                        network,
                        service: raw.service,
                    }),
                    Err(e) => {
                        trace!("Skipping AWS prefix {}: {e}", raw.ip_prefix);
                        None
                    }
                }
            })
            .collect();
        Ok(Self { prefixes })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.prefixes.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Service tag of the first prefix containing `ip`.
    ///
    /// The generic `AMAZON` tag is reported as `shared`.
    pub fn service_for(&self, ip: Ipv4Addr) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|prefix| prefix.network.contains(ip))
            .map(|prefix| match prefix.service.as_str() {
                GENERIC_TAG => SHARED_LABEL,
                service => service,
            })
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
