//! Per-domain pipeline: resolve, probe, attribute, scan ports, verify SMTP.
//!
//! Domains are audited one after another. Within a domain the stages run in a
//! fixed order and every stage turns its own failures into result fields, so
//! a run always produces one [`DomainResult`] per [`DomainSpec`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use cloudscout_common::config::Config;
use cloudscout_common::inventory::DomainSpec;
use cloudscout_common::record::{Attribution, DomainResult};
use reqwest::Client;
use tracing::{debug, info};

use crate::cloud::CloudAttributor;
use crate::dns::{DnsLookup, HickoryLookup};
use crate::ports::PortScanner;
use crate::prober::Prober;
use crate::progress::{Indicator, ProgressTask, Silent};
use crate::resolver::Resolver;
use crate::smtp::SmtpVerifier;

pub struct Auditor {
    resolver: Resolver,
    prober: Prober,
    attributor: CloudAttributor,
    scanner: PortScanner,
    smtp: SmtpVerifier,
    indicator: Arc<dyn Indicator>,
    tick: Duration,
}

impl Auditor {
    /// Builds the pipeline on top of the system DNS configuration.
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let lookup = Arc::new(HickoryLookup::from_system(cfg.dns_timeout));
        Self::with_lookup(cfg, lookup)
    }

    pub fn with_lookup(cfg: &Config, lookup: Arc<dyn DnsLookup>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(cfg.http_timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            resolver: Resolver::new(lookup.clone()),
            prober: Prober::new(
                client.clone(),
                cfg.head_user_agent.clone(),
                cfg.get_user_agent.clone(),
            ),
            attributor: CloudAttributor::new(client, cfg.datasets.clone()),
            scanner: PortScanner::new(cfg.port_timeout),
            smtp: SmtpVerifier::new(lookup, cfg.smtp_port, cfg.smtp_timeout),
            indicator: Arc::new(Silent),
            tick: cfg.progress_tick,
        })
    }

    pub fn with_indicator(mut self, indicator: Arc<dyn Indicator>) -> Self {
        self.indicator = indicator;
        self
    }

    /// Audits `domains` sequentially, preserving their order.
    pub async fn audit_all(&self, domains: &[DomainSpec]) -> Vec<DomainResult> {
        let mut results = Vec::with_capacity(domains.len());
        for spec in domains {
            results.push(self.audit(spec).await);
        }
        info!("Audited {} domains", results.len());
        results
    }

    pub async fn audit(&self, spec: &DomainSpec) -> DomainResult {
        let progress = ProgressTask::spawn(self.indicator.begin(&spec.name), self.tick);

        let address = self.resolver.resolve(&spec.name).await;
        debug!("Checking: {}", spec.name);

        let reachable = self.prober.is_reachable(&address.host).await;
        progress.stop().await;

        let attribution = match (reachable, address.ipv4) {
            (true, Some(ip)) => self.attributor.attribute(ip).await,
            _ => Attribution::unknown(),
        };

        let ports = self.scanner.scan(address.ipv4, &spec.ports).await;
        let smtp_open = self.smtp.verify(&spec.name).await;

        DomainResult {
            name: spec.name.clone(),
            reachable,
            address,
            attribution,
            smtp_open,
            ports,
        }
    }
}
