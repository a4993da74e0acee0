//! Cloud provider attribution for a resolved address.
//!
//! Providers are checked in a fixed order and the first match wins:
//! AWS (published ranges, with service tags), GCP (published ranges, no
//! service granularity), then a coarse Azure prefix heuristic.
//!
//! Datasets are downloaded on every call. A download or decode failure turns
//! that provider's check into "no match" and attribution carries on.

use std::net::Ipv4Addr;

use cloudscout_common::config::{DatasetSources, RangeDataset};
use cloudscout_common::record::{Attribution, Provider};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

pub mod aws;
pub mod azure;
pub mod gcp;

use aws::AwsRanges;
use gcp::PrefixList;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to fetch IP ranges from {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },
    #[error("IP ranges at {url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("IP ranges document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("IP ranges document has no '{0}' array")]
    MissingArray(String),
}

pub struct CloudAttributor {
    client: Client,
    sources: DatasetSources,
}

impl CloudAttributor {
    pub fn new(client: Client, sources: DatasetSources) -> Self {
        Self { client, sources }
    }

    pub async fn attribute(&self, ip: Ipv4Addr) -> Attribution {
        if let Some(service) = self.aws_service(ip).await {
            return Attribution::new(Provider::Aws, service);
        }
        if self.in_dataset(&self.sources.gcp, ip).await {
            return Attribution::provider_only(Provider::Gcp);
        }
        if azure::matches(ip) {
            return Attribution::provider_only(Provider::Azure);
        }
        Attribution::unknown()
    }

    async fn aws_service(&self, ip: Ipv4Addr) -> Option<String> {
        let body = self.download(&self.sources.aws_url).await.map_err(report).ok()?;
        let ranges = AwsRanges::from_slice(&body).map_err(report).ok()?;
        ranges.service_for(ip).map(str::to_string)
    }

    async fn in_dataset(&self, dataset: &RangeDataset, ip: Ipv4Addr) -> bool {
        let prefixes = match self.download(&dataset.url).await {
            Ok(body) => PrefixList::from_slice(&body, dataset),
            Err(e) => Err(e),
        };
        match prefixes {
            Ok(prefixes) => prefixes.contains(ip),
            Err(e) => {
                report(e);
                false
            }
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, DatasetError> {
        let fetch = |source| DatasetError::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(fetch)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(fetch)?;
        debug!("Fetched {} bytes of IP ranges from {url}", body.len());
        Ok(body.to_vec())
    }
}

fn report(e: DatasetError) {
    debug!("{e}");
}
