mod pipeline;
mod prober;

use std::net::SocketAddr;
use std::time::Duration;

use cloudscout_common::config::{Config, DatasetSources, RangeDataset};

pub const AWS_FIXTURE: &str = r#"{
    "syncToken": "1700000000",
    "prefixes": [
        { "ip_prefix": "127.0.0.0/8", "region": "local", "service": "EC2" },
        { "ip_prefix": "3.5.140.0/22", "region": "ap-northeast-2", "service": "AMAZON" },
        { "ip_prefix": "52.95.110.0/24", "region": "eu-west-1", "service": "S3" },
        { "ip_prefix": "bogus", "service": "EC2" }
    ]
}"#;

pub const GCP_FIXTURE: &str = r#"{
    "syncToken": "1700000000000",
    "prefixes": [
        { "ipv4Prefix": "34.80.0.0/15", "service": "Google Cloud" },
        { "ipv6Prefix": "2600:1900::/28", "service": "Google Cloud" },
        { "ipv4Prefix": null }
    ]
}"#;

/// Short timeouts and datasets served from `datasets`.
pub fn test_config(datasets: SocketAddr) -> Config {
    Config {
        http_timeout: Duration::from_secs(2),
        port_timeout: Duration::from_millis(500),
        smtp_timeout: Duration::from_millis(500),
        dns_timeout: Duration::from_millis(500),
        progress_tick: Duration::from_millis(5),
        datasets: DatasetSources {
            aws_url: format!("http://{datasets}/aws.json"),
            gcp: RangeDataset {
                url: format!("http://{datasets}/gcp.json"),
                array_key: "prefixes".to_string(),
                cidr_key: "ipv4Prefix".to_string(),
            },
        },
        ..Config::default()
    }
}
