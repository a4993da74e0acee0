use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use cloudscout_core::dns::{DnsLookup, LookupError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const LOCALHOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// In-memory DNS table.
#[derive(Default)]
pub struct Zone {
    pub a: HashMap<String, Vec<Ipv4Addr>>,
    pub cname: HashMap<String, String>,
    pub mx: HashMap<String, Vec<String>>,
}

impl Zone {
    pub fn with_a(mut self, name: &str, ip: Ipv4Addr) -> Self {
        self.a.entry(name.to_string()).or_default().push(ip);
        self
    }

    pub fn with_cname(mut self, name: &str, target: &str) -> Self {
        self.cname.insert(name.to_string(), target.to_string());
        self
    }

    pub fn with_mx(mut self, name: &str, exchanger: &str) -> Self {
        self.mx.entry(name.to_string()).or_default().push(exchanger.to_string());
        self
    }
}

fn missing(record: &'static str, name: &str) -> LookupError {
    LookupError::Resolve {
        record,
        name: name.to_string(),
        reason: "no records found".to_string(),
    }
}

#[async_trait]
impl DnsLookup for Zone {
    async fn ipv4(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        self.a.get(name).cloned().ok_or_else(|| missing("A", name))
    }

    async fn cname(&self, name: &str) -> Result<Option<String>, LookupError> {
        Ok(self.cname.get(name).cloned())
    }

    async fn mx(&self, name: &str) -> Result<Vec<String>, LookupError> {
        self.mx.get(name).cloned().ok_or_else(|| missing("MX", name))
    }
}

/// A canned HTTP answer.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }
}

/// Minimal HTTP/1.1 server. `route` maps (method, path) to a reply.
///
/// Anything that is not plain HTTP, such as a TLS handshake, gets an HTTP
/// error line back and fails on the client side.
pub async fn http_server<F>(route: F) -> SocketAddr
where
    F: Fn(&str, &str) -> Reply + Send + Sync + Clone + 'static,
{
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let route = route.clone();
            tokio::spawn(async move {
                let mut raw = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            raw.extend_from_slice(&buf[..n]);
                            if raw.windows(4).any(|w| w == b"\r\n\r\n") || raw.len() > 16 * 1024 {
                                break;
                            }
                            if raw.len() >= 4 && !raw.starts_with(b"GET ") && !raw.starts_with(b"HEAD") {
                                break;
                            }
                        }
                    }
                }

                let request = String::from_utf8_lossy(&raw);
                let mut first = request.lines().next().unwrap_or_default().split_whitespace();
                let method = first.next().unwrap_or_default().to_string();
                let path = first.next().unwrap_or_default().to_string();
                let reply = if method == "GET" || method == "HEAD" {
                    route(&method, &path)
                } else {
                    Reply::status(400)
                };

                let body = if method == "HEAD" { "" } else { reply.body.as_str() };
                let response = format!(
                    "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.status,
                    reply.body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

/// Accepts connections and never writes a byte.
pub async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// Greets every client with `banner`.
pub async fn smtp_server(banner: &'static str) -> SocketAddr {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = socket.write_all(banner.as_bytes()).await;
                tokio::time::sleep(Duration::from_secs(5)).await;
            });
        }
    });
    addr
}

/// A local port with nothing listening on it.
pub async fn unused_port() -> u16 {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    listener.local_addr().unwrap().port()
}
