//! Range documents shaped like Google Cloud's `cloud.json`.
//!
//! The array key and the CIDR key are configurable, so the same decoder also
//! serves any other provider publishing `{ "<array>": [{ "<cidr>": "a.b.c.d/n" }] }`.

use std::net::Ipv4Addr;

use cloudscout_common::config::RangeDataset;
use ipnetwork::Ipv4Network;
use serde_json::{Map, Value};

use super::DatasetError;

#[derive(Debug, Clone, Default)]
pub struct PrefixList {
    networks: Vec<Ipv4Network>,
}

impl PrefixList {
    /// Entries that are not objects, lack the CIDR key, carry a non-string
    /// value or hold an IPv6 prefix are skipped.
    pub fn from_slice(body: &[u8], layout: &RangeDataset) -> Result<Self, DatasetError> {
        let document: Map<String, Value> = serde_json::from_slice(body)?;
        let entries = document
            .get(&layout.array_key)
            .and_then(Value::as_array)
            .ok_or_else(|| DatasetError::MissingArray(layout.array_key.clone()))?;

        let networks = entries
            .iter()
            .filter_map(|entry| entry.get(&layout.cidr_key)?.as_str())
            .filter_map(|cidr| cidr.parse::<Ipv4Network>().ok())
            .collect();
        Ok(Self { networks })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.networks.iter().any(|network| network.contains(ip))
    }
}
