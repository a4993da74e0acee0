use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cloudscout_common::inventory::DomainSpec;
use cloudscout_common::record::{Attribution, PortState, Provider, Status};
use cloudscout_core::audit::Auditor;
use cloudscout_core::progress::{Indicator, Ticker};

use super::{AWS_FIXTURE, GCP_FIXTURE, test_config};
use crate::support::{self, LOCALHOST, Reply, Zone};

/// Serves the datasets and answers 200 on `/`.
async fn web_and_datasets() -> std::net::SocketAddr {
    support::http_server(|_, path| match path {
        "/aws.json" => Reply::json(AWS_FIXTURE),
        "/gcp.json" => Reply::json(GCP_FIXTURE),
        _ => Reply::status(200),
    })
    .await
}

#[tokio::test]
async fn reachable_domain_gets_every_field() {
    let web = web_and_datasets().await;
    let smtp = support::smtp_server("220 mx.local ESMTP ready\r\n").await;
    let closed = support::unused_port().await;

    let domain = format!("localhost:{}", web.port());
    let zone = Zone::default()
        .with_a(&domain, LOCALHOST)
        .with_mx(&domain, "127.0.0.1");

    let mut cfg = test_config(web);
    cfg.smtp_port = smtp.port();
    let auditor = Auditor::with_lookup(&cfg, Arc::new(zone)).unwrap();

    let spec = DomainSpec::new(domain.clone())
        .with_port("web", web.port())
        .with_port("alt", closed);
    let result = auditor.audit(&spec).await;

    assert_eq!(result.name, domain);
    assert_eq!(result.status(), Status::Active);
    assert_eq!(result.address.ipv4, Some(LOCALHOST));
    assert_eq!(result.address.host, domain);
    assert_eq!(result.attribution, Attribution::new(Provider::Aws, "EC2"));
    assert!(result.smtp_open);
    assert_eq!(result.ports["web"], PortState::Open);
    assert_eq!(result.ports["alt"], PortState::Closed);
}

#[tokio::test]
async fn unresolvable_domain_is_deactive_with_sentinel() {
    let datasets = web_and_datasets().await;
    let auditor = Auditor::with_lookup(&test_config(datasets), Arc::new(Zone::default())).unwrap();

    let spec = DomainSpec::new("nowhere.invalid").with_port("http", 80);
    let result = auditor.audit(&spec).await;

    assert_eq!(result.status(), Status::Deactive);
    assert!(!result.address.is_resolved());
    assert_eq!(result.address.to_string(), "N/A");
    assert_eq!(result.attribution, Attribution::unknown());
    assert!(!result.smtp_open);
    assert_eq!(result.ports["http"], PortState::Closed);
}

#[tokio::test]
async fn reachable_without_a_record_is_active_but_unattributed() {
    let web = web_and_datasets().await;
    let domain = format!("localhost:{}", web.port());
    let auditor = Auditor::with_lookup(&test_config(web), Arc::new(Zone::default())).unwrap();

    let result = auditor.audit(&DomainSpec::new(domain)).await;

    assert_eq!(result.status(), Status::Active);
    assert_eq!(result.address.to_string(), "N/A");
    assert_eq!(result.attribution, Attribution::unknown());
}

#[tokio::test]
async fn unreachable_domain_skips_attribution() {
    let datasets = web_and_datasets().await;
    let dead = support::unused_port().await;
    let domain = format!("localhost:{dead}");
    let zone = Zone::default().with_a(&domain, LOCALHOST);
    let auditor = Auditor::with_lookup(&test_config(datasets), Arc::new(zone)).unwrap();

    let result = auditor.audit(&DomainSpec::new(domain)).await;

    assert_eq!(result.status(), Status::Deactive);
    assert_eq!(result.address.ipv4, Some(LOCALHOST));
    // 127/8 is in the AWS fixture, but nothing is attributed without reachability.
    assert_eq!(result.attribution, Attribution::unknown());
    assert!(result.ports.is_empty());
}

#[tokio::test]
async fn cname_alias_is_checked_under_its_own_name() {
    let web = web_and_datasets().await;
    let alias = format!("localhost:{}", web.port());
    let zone = Zone::default()
        .with_cname(&alias, "origin.test.")
        .with_a("origin.test.", LOCALHOST);
    let auditor = Auditor::with_lookup(&test_config(web), Arc::new(zone)).unwrap();

    let result = auditor.audit(&DomainSpec::new(alias.clone())).await;

    assert_eq!(result.address.ipv4, Some(LOCALHOST));
    assert_eq!(result.address.host, alias);
    assert_eq!(result.status(), Status::Active);
}

#[tokio::test]
async fn wrong_smtp_greeting_is_closed() {
    let web = web_and_datasets().await;
    let smtp = support::smtp_server("421 error\r\n").await;
    let zone = Zone::default().with_mx("mail.test", "127.0.0.1");

    let mut cfg = test_config(web);
    cfg.smtp_port = smtp.port();
    let auditor = Auditor::with_lookup(&cfg, Arc::new(zone)).unwrap();

    let result = auditor.audit(&DomainSpec::new("mail.test")).await;
    assert!(!result.smtp_open);
}

#[derive(Default)]
struct Recorder {
    begun: Mutex<Vec<String>>,
    cleared: Arc<AtomicUsize>,
}

struct RecordingTicker {
    cleared: Arc<AtomicUsize>,
}

impl Indicator for Recorder {
    fn begin(&self, domain: &str) -> Box<dyn Ticker> {
        self.begun.lock().unwrap().push(domain.to_string());
        Box::new(RecordingTicker {
            cleared: self.cleared.clone(),
        })
    }
}

impl Ticker for RecordingTicker {
    fn tick(&mut self) {}

    fn clear(&mut self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn domains_are_audited_in_order_with_one_indicator_each() {
    let datasets = web_and_datasets().await;
    let recorder = Arc::new(Recorder::default());
    let auditor = Auditor::with_lookup(&test_config(datasets), Arc::new(Zone::default()))
        .unwrap()
        .with_indicator(recorder.clone());

    let specs = vec![
        DomainSpec::new("b.invalid").with_port("http", 80).with_port("https", 443),
        DomainSpec::new("a.invalid").with_port("http", 80).with_port("ssh", 22),
    ];
    let results = auditor.audit_all(&specs).await;

    let names: Vec<&str> = results.iter().map(|result| result.name.as_str()).collect();
    assert_eq!(names, vec!["b.invalid", "a.invalid"]);
    assert_eq!(*recorder.begun.lock().unwrap(), vec!["b.invalid", "a.invalid"]);
    assert_eq!(recorder.cleared.load(Ordering::SeqCst), 2);

    // Each record only carries the labels its own domain declared.
    assert_eq!(results[0].ports.keys().collect::<Vec<_>>(), vec!["http", "https"]);
    assert_eq!(results[1].ports.keys().collect::<Vec<_>>(), vec!["http", "ssh"]);
}
