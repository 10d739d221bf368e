//! Integration tests for the certificate search sweep
//!
//! These tests use wiremock to stand in for the certificate search service
//! and drive the unit through the real HTTP transport and event bus.

use ct_sweep::config::{parse_config, Config, DomainScope, DEFAULT_REFERER};
use ct_sweep::discovery::{
    DataSource, DiscoveryRequest, GoogleCt, HttpTransport, SweepOutcome,
};
use ct_sweep::events::{Envelope, EventBus, Priority, SweepEvent};
use ct_sweep::output::{drain_events, NameWriter};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/ct/certsearch";
const NEXT_PATH: &str = "/ct/certsearch/page";

/// Creates a configuration pointing at the mock server
fn create_test_config(server: &MockServer) -> Config {
    parse_config(&format!(
        r#"
[source]
base-url = "{}{}"
rate-limit-ms = 10
timeout-secs = 5

[user-agent]
client-name = "ct-sweep-test"
client-version = "0.0.1"
contact-url = "https://example.com/about"

[[domain]]
name = "example.com"
"#,
        server.uri(),
        SEARCH_PATH
    ))
    .expect("test config is valid")
}

fn create_unit(config: &Config, bus: &EventBus) -> GoogleCt {
    let transport = Arc::new(
        HttpTransport::from_config(&config.user_agent, &config.source)
            .expect("Failed to build transport"),
    );
    let scope = Arc::new(DomainScope::from_config(config).expect("Failed to build scope"));
    GoogleCt::new(&config.source, transport, scope, Arc::new(bus.clone()))
        .expect("Failed to build unit")
}

/// Renders a response body in the shape the certificate search returns
fn search_page(names: &[&str], tuple: &str) -> String {
    let rows: Vec<String> = names
        .iter()
        .map(|n| {
            format!(
                r#"[null,"{}","Let's Encrypt",1577836800000,1609459200000,"aGFzaA=="]"#,
                n
            )
        })
        .collect();
    format!(
        ")]}}'\n\n[[\"https.ct.cdsr\",[{}],[[\"Let's Encrypt\",\"aWQ=\"]],{}]]\n",
        rows.join(","),
        tuple
    )
}

fn drain(rx: &mut broadcast::Receiver<Envelope>) -> Vec<Envelope> {
    let mut envelopes = Vec::new();
    while let Ok(envelope) = rx.try_recv() {
        envelopes.push(envelope);
    }
    envelopes
}

fn names(envelopes: &[Envelope]) -> Vec<String> {
    envelopes
        .iter()
        .filter_map(|e| e.event.as_name().map(|n| n.name.clone()))
        .collect()
}

fn logs(envelopes: &[Envelope]) -> Vec<String> {
    envelopes
        .iter()
        .filter_map(|e| match &e.event {
            SweepEvent::Log { message } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

async fn mount_first_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("domain", "example.com"))
        .and(query_param("include_expired", "true"))
        .and(query_param("include_subdomains", "true"))
        .and(header("referer", DEFAULT_REFERER))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_next_page(
    server: &MockServer,
    token: &str,
    response: ResponseTemplate,
    calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(NEXT_PATH))
        .and(query_param("domain", "example.com"))
        .and(query_param("p", token))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_sweep_three_pages() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        search_page(
            &["www.example.com", "mail.example.com"],
            r#"[null,"tok2",null,1,3]"#,
        ),
    )
    .await;
    mount_next_page(
        &server,
        "tok2",
        ResponseTemplate::new(200).set_body_string(search_page(
            &["*.cdn.example.com", "www.other.org"],
            r#"["tok2","tok3",null,2,3]"#,
        )),
        1,
    )
    .await;
    mount_next_page(
        &server,
        "tok3",
        ResponseTemplate::new(200).set_body_string(search_page(
            &["www.example.com"],
            r#"["tok3","tok4",null,3,3]"#,
        )),
        1,
    )
    .await;

    let config = create_test_config(&server);
    let bus = EventBus::new();
    let mut rx = bus.subscribe();
    let unit = create_unit(&config, &bus);

    let summary = unit
        .on_request(
            &DiscoveryRequest::new("example.com", "dns", "Test"),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.outcome, SweepOutcome::Exhausted);
    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.names_found, 4);

    let envelopes = drain(&mut rx);
    assert_eq!(
        names(&envelopes),
        vec![
            "www.example.com",
            "mail.example.com",
            "cdn.example.com",
            "www.example.com"
        ]
    );

    let heartbeats: Vec<&Envelope> = envelopes
        .iter()
        .filter(|e| matches!(e.event, SweepEvent::SetActive { .. }))
        .collect();
    assert_eq!(heartbeats.len(), 3);
    assert!(heartbeats.iter().all(|e| e.priority == Priority::Critical));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_failure_on_second_page_keeps_first_page() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        search_page(&["a.example.com"], r#"[null,"tok2",null,1,3]"#),
    )
    .await;
    mount_next_page(&server, "tok2", ResponseTemplate::new(500), 1).await;
    mount_next_page(
        &server,
        "tok3",
        ResponseTemplate::new(200).set_body_string(search_page(
            &["c.example.com"],
            r#"["tok3","tok4",null,3,3]"#,
        )),
        0,
    )
    .await;

    let config = create_test_config(&server);
    let bus = EventBus::new();
    let mut rx = bus.subscribe();
    let unit = create_unit(&config, &bus);

    let summary = unit
        .on_request(
            &DiscoveryRequest::new("example.com", "dns", "Test"),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.outcome, SweepOutcome::TransportFailed);

    let envelopes = drain(&mut rx);
    assert_eq!(names(&envelopes), vec!["a.example.com"]);

    let failures: Vec<String> = logs(&envelopes)
        .into_iter()
        .filter(|m| m.starts_with("GoogleCT: "))
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("500"));
}

#[tokio::test]
async fn test_out_of_scope_domain_sends_nothing() {
    let server = MockServer::start().await;
    let config = create_test_config(&server);
    let bus = EventBus::new();
    let mut rx = bus.subscribe();
    let unit = create_unit(&config, &bus);

    let summary = unit
        .on_request(
            &DiscoveryRequest::new("example.org", "dns", "Test"),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.outcome, SweepOutcome::OutOfScope);
    assert!(drain(&mut rx).is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_subdomain_request_uses_root_pattern() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("domain", "dev.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(
            &["api.dev.example.com"],
            r#"[null,"t",null,1,1]"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let bus = EventBus::new();
    let mut rx = bus.subscribe();
    let unit = create_unit(&config, &bus);

    let summary = unit
        .on_request(
            &DiscoveryRequest::new("dev.example.com", "dns", "Test"),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(summary.outcome, SweepOutcome::Exhausted);
    let envelopes = drain(&mut rx);
    assert_eq!(names(&envelopes), vec!["api.dev.example.com"]);
    assert_eq!(
        logs(&envelopes),
        vec!["Querying GoogleCT for dev.example.com subdomains"]
    );
}

#[tokio::test]
async fn test_cancel_during_slow_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_page(&["late.example.com"], r#"[null,"t",null,1,1]"#))
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&server)
        .await;

    let config = create_test_config(&server);
    let bus = EventBus::new();
    let mut rx = bus.subscribe();
    let unit = create_unit(&config, &bus);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let summary = unit
        .on_request(&DiscoveryRequest::new("example.com", "dns", "Test"), &cancel)
        .await;

    assert_eq!(summary.outcome, SweepOutcome::Cancelled);
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(names(&drain(&mut rx)).is_empty());
}

#[tokio::test]
async fn test_names_stream_to_output_file() {
    let server = MockServer::start().await;
    mount_first_page(
        &server,
        search_page(
            &["www.example.com", "www.example.com", "vpn.example.com"],
            r#"[null,"t",null,3,3]"#,
        ),
    )
    .await;

    let config = create_test_config(&server);
    let bus = EventBus::new();
    let events = bus.subscribe();
    let unit = create_unit(&config, &bus);
    drop(bus);

    let file = tempfile::NamedTempFile::new().unwrap();
    let mut writer = NameWriter::create(file.path()).unwrap();
    let consumer = tokio::spawn(async move { drain_events(events, &mut writer).await });

    unit.on_request(
        &DiscoveryRequest::new("example.com", "dns", "Test"),
        &CancellationToken::new(),
    )
    .await;
    drop(unit);

    let report = consumer.await.unwrap().unwrap();
    assert_eq!(report.written, 3);
    assert_eq!(report.dropped, 0);

    // No deduplication: downstream owns that
    let content = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(content, "www.example.com\nwww.example.com\nvpn.example.com\n");
}
