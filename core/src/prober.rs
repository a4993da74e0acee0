//! HTTP(S) reachability checks.

use reqwest::header::USER_AGENT;
use reqwest::{Client, Method};
use tracing::debug;

const SCHEMES: [&str; 2] = ["https", "http"];

pub struct Prober {
    client: Client,
    head_user_agent: String,
    get_user_agent: String,
}

impl Prober {
    /// `client` must carry the per-request timeout; the prober adds none of its own.
    pub fn new(client: Client, head_user_agent: String, get_user_agent: String) -> Self {
        Self {
            client,
            head_user_agent,
            get_user_agent,
        }
    }

    /// Tries HTTPS then HTTP, each with HEAD and then GET, and reports whether
    /// any attempt answered below 400.
    pub async fn is_reachable(&self, host: &str) -> bool {
        for scheme in SCHEMES {
            let url = format!("{scheme}://{host}");
            if self.attempt(Method::HEAD, &url, &self.head_user_agent).await {
                return true;
            }
            if self.attempt(Method::GET, &url, &self.get_user_agent).await {
                return true;
            }
        }
        false
    }

    async fn attempt(&self, method: Method, url: &str, user_agent: &str) -> bool {
        let request = self
            .client
            .request(method.clone(), url)
            .header(USER_AGENT, user_agent);

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.as_u16() < 400 {
                    debug!("{method} Success: {url} (Status: {})", status.as_u16());
                    true
                } else {
                    debug!("{method} Rejected: {url} (Status: {})", status.as_u16());
                    false
                }
            }
            Err(e) => {
                debug!("{method} Failed: {url} ({e})");
                false
            }
        }
    }
}
