//! SMTP greeting check against a domain's mail exchanger.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::dns::DnsLookup;

const BANNER_BUFFER: usize = 1024;
const READY_CODE: &[u8] = b"220";

pub struct SmtpVerifier {
    lookup: Arc<dyn DnsLookup>,
    port: u16,
    io_timeout: Duration,
}

impl SmtpVerifier {
    pub fn new(lookup: Arc<dyn DnsLookup>, port: u16, io_timeout: Duration) -> Self {
        Self {
            lookup,
            port,
            io_timeout,
        }
    }

    /// Checks the first MX host the lookup returns; other exchangers are not tried.
    pub async fn verify(&self, domain: &str) -> bool {
        let exchangers = match self.lookup.mx(domain).await {
            Ok(exchangers) => exchangers,
            Err(e) => {
                debug!("Failed to lookup MX for {domain}: {e}");
                return false;
            }
        };
        let Some(host) = exchangers.first() else {
            debug!("{domain} has no mail exchanger");
            return false;
        };
        greets_ready(host, self.port, self.io_timeout).await
    }
}

/// Connects to `host:port` and reports whether the first bytes received start with `220`.
///
/// `bound` applies to the connect and to the read separately.
pub async fn greets_ready(host: &str, port: u16, bound: Duration) -> bool {
    let mut stream = match timeout(bound, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            debug!("Failed to connect SMTP: {host} ({e})");
            return false;
        }
        Err(_elapsed) => {
            debug!("Failed to connect SMTP: {host} (timed out)");
            return false;
        }
    };

    let mut buf = [0u8; BANNER_BUFFER];
    match timeout(bound, stream.read(&mut buf)).await {
        Ok(Ok(n)) => {
            let ready = buf[..n].starts_with(READY_CODE);
            if !ready {
                debug!(
                    "Unexpected SMTP banner from {host}: {:?}",
                    String::from_utf8_lossy(&buf[..n]).trim_end()
                );
            }
            ready
        }
        Ok(Err(e)) => {
            debug!("Failed to read SMTP banner from {host}: {e}");
            false
        }
        Err(_elapsed) => {
            debug!("No SMTP banner from {host} within {bound:?}");
            false
        }
    }
}
