//! Domain → IPv4 resolution with a single level of CNAME fallback.

use std::net::Ipv4Addr;
use std::sync::Arc;

use cloudscout_common::record::ResolvedAddress;
use tracing::debug;

use crate::dns::{DnsLookup, trim_root};

pub struct Resolver {
    lookup: Arc<dyn DnsLookup>,
}

impl Resolver {
    pub fn new(lookup: Arc<dyn DnsLookup>) -> Self {
        Self { lookup }
    }

    /// Resolves `domain` to its first IPv4 address.
    ///
    /// When the name has no A record of its own, its CNAME target is looked up
    /// instead. The returned host is always `domain` itself so later probes
    /// address the name the user asked about.
    pub async fn resolve(&self, domain: &str) -> ResolvedAddress {
        match self.lookup.ipv4(domain).await {
            Ok(ips) => {
                if let Some(ip) = ips.first() {
                    return ResolvedAddress::resolved(*ip, domain);
                }
            }
            Err(e) => debug!("{e}"),
        }

        if let Some(ip) = self.via_cname(domain).await {
            return ResolvedAddress::resolved(ip, domain);
        }

        debug!("Failed to resolve domain: {domain}");
        ResolvedAddress::unresolved(domain)
    }

    async fn via_cname(&self, domain: &str) -> Option<Ipv4Addr> {
        let target = match self.lookup.cname(domain).await {
            Ok(Some(target)) => target,
            Ok(None) => return None,
            Err(e) => {
                debug!("{e}");
                return None;
            }
        };

        if trim_root(&target).eq_ignore_ascii_case(trim_root(domain)) {
            return None;
        }
        debug!("CNAME found: {domain} → {target}");

        match self.lookup.ipv4(&target).await {
            Ok(ips) => ips.first().copied(),
            Err(e) => {
                debug!("{e}");
                None
            }
        }
    }
}
