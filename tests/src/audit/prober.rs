use std::time::{Duration, Instant};

use cloudscout_core::prober::Prober;
use reqwest::Client;

use crate::support::{self, Reply};

fn prober(timeout: Duration) -> Prober {
    let client = Client::builder().timeout(timeout).build().unwrap();
    Prober::new(client, "probe-head".to_string(), "probe-get".to_string())
}

#[tokio::test]
async fn plain_http_success_is_reachable() {
    let addr = support::http_server(|_, _| Reply::status(200)).await;
    assert!(prober(Duration::from_secs(2)).is_reachable(&addr.to_string()).await);
}

#[tokio::test]
async fn rejected_head_falls_back_to_get() {
    let addr = support::http_server(|method, _| match method {
        "HEAD" => Reply::status(405),
        _ => Reply::status(204),
    })
    .await;
    assert!(prober(Duration::from_secs(2)).is_reachable(&addr.to_string()).await);
}

#[tokio::test]
async fn redirect_statuses_count_as_reachable() {
    let addr = support::http_server(|_, _| Reply::status(304)).await;
    assert!(prober(Duration::from_secs(2)).is_reachable(&addr.to_string()).await);
}

#[tokio::test]
async fn error_statuses_everywhere_are_unreachable() {
    let addr = support::http_server(|_, _| Reply::status(503)).await;
    assert!(!prober(Duration::from_secs(2)).is_reachable(&addr.to_string()).await);
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let port = support::unused_port().await;
    let host = format!("127.0.0.1:{port}");
    assert!(!prober(Duration::from_secs(2)).is_reachable(&host).await);
}

#[tokio::test]
async fn silent_endpoint_is_bounded_by_the_request_timeout() {
    let addr = support::silent_server().await;
    let timeout = Duration::from_millis(300);

    let started = Instant::now();
    let reachable = prober(timeout).is_reachable(&addr.to_string()).await;

    assert!(!reachable);
    assert!(
        started.elapsed() < timeout * 4 + Duration::from_secs(2),
        "probe took {:?}",
        started.elapsed()
    );
}
