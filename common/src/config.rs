use std::time::Duration;

pub const AWS_RANGES_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";
pub const GCP_RANGES_URL: &str = "https://www.gstatic.com/ipranges/cloud.json";

const HEAD_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const GET_USER_AGENT: &str = "Mozilla/5.0";

/// Settings for a single audit run.
///
/// Built once by the front end and handed to the pipeline, which never
/// consults any other global state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lets per-stage diagnostics (lookup, reachability and attribution
    /// failures) through the front end's log filter.
    ///
    /// Never changes the values in a result record.
    pub verbose: bool,
    /// Bound for every single HTTP request, including dataset downloads.
    pub http_timeout: Duration,
    /// Bound for one TCP connect during the port scan.
    pub port_timeout: Duration,
    /// Bound for the SMTP connect and, separately, for the banner read.
    pub smtp_timeout: Duration,
    /// Bound for one DNS query.
    pub dns_timeout: Duration,
    pub smtp_port: u16,
    /// Interval between two frames of the progress indicator.
    pub progress_tick: Duration,
    pub head_user_agent: String,
    pub get_user_agent: String,
    pub datasets: DatasetSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            http_timeout: Duration::from_secs(10),
            port_timeout: Duration::from_secs(2),
            smtp_timeout: Duration::from_secs(5),
            dns_timeout: Duration::from_secs(5),
            smtp_port: 25,
            progress_tick: Duration::from_millis(50),
            head_user_agent: HEAD_USER_AGENT.to_string(),
            get_user_agent: GET_USER_AGENT.to_string(),
            datasets: DatasetSources::default(),
        }
    }
}

/// Where the published cloud IP ranges are fetched from.
#[derive(Debug, Clone)]
pub struct DatasetSources {
    pub aws_url: String,
    pub gcp: RangeDataset,
}

impl Default for DatasetSources {
    fn default() -> Self {
        Self {
            aws_url: AWS_RANGES_URL.to_string(),
            gcp: RangeDataset {
                url: GCP_RANGES_URL.to_string(),
                array_key: "prefixes".to_string(),
                cidr_key: "ipv4Prefix".to_string(),
            },
        }
    }
}

/// A JSON document holding an array of objects, each carrying one CIDR string.
///
/// `array_key` names the top-level array and `cidr_key` the field inside
/// every element, e.g. `prefixes[].ipv4Prefix`.
#[derive(Debug, Clone)]
pub struct RangeDataset {
    pub url: String,
    pub array_key: String,
    pub cidr_key: String,
}
