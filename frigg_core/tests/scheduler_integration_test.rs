use frigg_core::{compile, Healthcheck, Outcome, Scheduler};
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{timeout, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers 200, 500, 200, ... in request order.
struct Alternating {
    calls: AtomicUsize,
}

impl Respond for Alternating {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            ResponseTemplate::new(200)
        } else {
            ResponseTemplate::new(500)
        }
    }
}

fn check(name: &str, interval: u64, url: String, assertions: &[&str]) -> Healthcheck {
    let assertions = assertions.iter().map(|raw| compile(raw).unwrap()).collect();
    Healthcheck::new(name, interval, url, assertions)
}

async fn collect_for(
    rx: &mut mpsc::UnboundedReceiver<Outcome>,
    window: Duration,
) -> Vec<(Duration, Outcome)> {
    let start = Instant::now();
    let deadline = start + window;
    let mut outcomes = Vec::new();

    while let Ok(Some(outcome)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        outcomes.push((start.elapsed(), outcome));
    }

    outcomes
}

#[tokio::test]
async fn test_immediate_round_then_interval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(Alternating {
            calls: AtomicUsize::new(0),
        })
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let start = Instant::now();
    let running = Scheduler::new(
        vec![check(
            "flaky",
            1,
            format!("{}/flaky", server.uri()),
            &["status_code(200)"],
        )],
        Client::new(),
    )
    .with_reporter(tx)
    .spawn();

    let first = timeout(Duration::from_millis(900), rx.recv())
        .await
        .expect("first round must not wait for the interval")
        .unwrap();
    assert_eq!(first, Outcome::new("flaky", true));

    let second = timeout(Duration::from_secs(3), rx.recv())
        .await
        .expect("second round should follow after one interval")
        .unwrap();
    assert_eq!(second, Outcome::new("flaky", false));
    assert!(start.elapsed() >= Duration::from_millis(900));

    let third = timeout(Duration::from_secs(3), rx.recv())
        .await
        .expect("third round should follow after two intervals")
        .unwrap();
    assert_eq!(third, Outcome::new("flaky", true));
    assert!(start.elapsed() >= Duration::from_millis(1900));

    running.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_check_keeps_scheduling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let running = Scheduler::new(
        vec![
            check("down", 1, "http://127.0.0.1:1/health".to_string(), &["text(OK)"]),
            check("up", 1, format!("{}/health", server.uri()), &["text(OK)"]),
        ],
        Client::new(),
    )
    .with_reporter(tx)
    .spawn();

    let outcomes = collect_for(&mut rx, Duration::from_millis(2500)).await;
    running.shutdown().await;

    let down: Vec<_> = outcomes
        .iter()
        .filter(|(_, o)| o.check_name == "down")
        .collect();
    let up: Vec<_> = outcomes
        .iter()
        .filter(|(_, o)| o.check_name == "up")
        .collect();

    assert!(down.len() >= 2, "down check rounds: {}", down.len());
    assert!(down.iter().all(|(_, o)| !o.passed));
    assert!(up.len() >= 2, "up check rounds: {}", up.len());
    assert!(up.iter().all(|(_, o)| o.passed));
}

#[tokio::test]
async fn test_slow_check_does_not_block_fast_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let running = Scheduler::new(
        vec![
            check("slow", 5, format!("{}/slow", server.uri()), &["status_code(200)"]),
            check("fast", 1, format!("{}/fast", server.uri()), &["status_code(200)"]),
        ],
        Client::new(),
    )
    .with_reporter(tx)
    .spawn();

    let outcomes = collect_for(&mut rx, Duration::from_millis(3500)).await;
    running.shutdown().await;

    let fast: Vec<_> = outcomes
        .iter()
        .filter(|(_, o)| o.check_name == "fast")
        .collect();
    assert!(fast.len() >= 3, "fast check rounds: {}", fast.len());
    assert!(fast.iter().all(|(_, o)| o.passed));
    assert!(fast[0].0 < Duration::from_millis(900));
    assert!(fast[1].0 < Duration::from_millis(2000));

    if let Some((at, slow)) = outcomes.iter().find(|(_, o)| o.check_name == "slow") {
        assert!(slow.passed);
        assert!(*at >= Duration::from_millis(2900));
    }
}

#[tokio::test]
async fn test_overrunning_rounds_overlap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(2500)))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let running = Scheduler::new(vec![check("slow", 1, server.uri(), &[])], Client::new())
        .with_reporter(tx)
        .spawn();

    let outcomes = collect_for(&mut rx, Duration::from_millis(4200)).await;
    running.shutdown().await;

    // Ticks at 0s and 1s finish around 2.5s and 3.5s even though each round takes 2.5s.
    assert!(outcomes.len() >= 2, "rounds completed: {}", outcomes.len());
    assert!(outcomes[1].0 < Duration::from_millis(4000));
}
