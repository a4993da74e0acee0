//! DNS queries used by the resolver and the SMTP verifier.
//!
//! The pipeline only ever talks to [`DnsLookup`], so the system resolver can be
//! swapped for a static table in tests.

use std::future::Future;
use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::proto::rr::{RData, RecordType};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{record} lookup for {name} timed out after {timeout:?}")]
    Timeout {
        record: &'static str,
        name: String,
        timeout: Duration,
    },
    #[error("{record} lookup for {name} failed: {reason}")]
    Resolve {
        record: &'static str,
        name: String,
        reason: String,
    },
}

#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// All A records of `name`, in the order the server returned them.
    async fn ipv4(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupError>;

    /// The canonical name `name` aliases, if it has a CNAME record.
    async fn cname(&self, name: &str) -> Result<Option<String>, LookupError>;

    /// Mail exchanger hosts, in the order the server returned them.
    async fn mx(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

/// [`DnsLookup`] over the system's configured name servers.
pub struct HickoryLookup {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl HickoryLookup {
    /// Reads `/etc/resolv.conf` (or the platform equivalent), falling back to
    /// public resolvers when that is not possible.
    pub fn from_system(timeout: Duration) -> Self {
        let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                debug!("No usable system resolver configuration ({e}), using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.cache_size = 0;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            timeout,
        }
    }

    async fn bounded<T, E, F>(&self, record: &'static str, name: &str, query: F) -> Result<T, LookupError>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(Ok(answer)) => Ok(answer),
            Ok(Err(e)) => Err(LookupError::Resolve {
                record,
                name: name.to_string(),
                reason: e.to_string(),
            }),
            Err(_elapsed) => Err(LookupError::Timeout {
                record,
                name: name.to_string(),
                timeout: self.timeout,
            }),
        }
    }
}

#[async_trait]
impl DnsLookup for HickoryLookup {
    async fn ipv4(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        let answer = self.bounded("A", name, self.resolver.ipv4_lookup(name)).await?;
        Ok(answer.iter().map(|a| a.0).collect())
    }

    async fn cname(&self, name: &str) -> Result<Option<String>, LookupError> {
        let answer = self
            .bounded("CNAME", name, self.resolver.lookup(name, RecordType::CNAME))
            .await?;
        let target = answer.iter().find_map(|rdata| match rdata {
            RData::CNAME(cname) => Some(trim_root(&cname.0.to_utf8()).to_string()),
            _ => None,
        });
        Ok(target)
    }

    async fn mx(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let answer = self.bounded("MX", name, self.resolver.mx_lookup(name)).await?;
        Ok(answer
            .iter()
            .map(|mx| trim_root(&mx.exchange().to_utf8()).to_string())
            .collect())
    }
}

/// Strips the trailing root label, `mail.example.com.` → `mail.example.com`.
pub fn trim_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
