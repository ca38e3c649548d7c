use crate::error::ForwardError;
use crate::forwarder::{Forwarder, DISCOVERY_KEY};
use crate::poller::Poller;
use crate::scheduler::{due_entries, PollScheduler, ScheduleEntry};
use async_trait::async_trait;
use jolzab_config::BridgeConfig;
use jolzab_jolokia::{JolokiaClient, JolokiaError, ReadRequest, ReadResponse};
use jolzab_zabbix::{MetricSink, SenderResponse, ZabbixError, ZabbixMetric};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

const FIXTURE: &str = r#"
- key: common
  poll-frequency: 60
  requests:
    - mbean: java.lang:type=Memory
      attribute: HeapMemoryUsage
      path: used
- key: db
  endpoint: http://db-host:8778/jolokia/
  poll-frequency: 10
  requests:
    - mbean: java.lang:type=Threading
      attribute: ThreadCount
      path: ""
"#;

fn fixture() -> Arc<BridgeConfig> {
    Arc::new(BridgeConfig::parse(FIXTURE).unwrap())
}

// ── Fakes ──

struct FakeJolokia {
    responses: Vec<ReadResponse>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl FakeJolokia {
    fn new(responses: Vec<ReadResponse>) -> Self {
        Self {
            responses,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl JolokiaClient for FakeJolokia {
    async fn execute(
        &self,
        endpoint: &str,
        requests: &[ReadRequest],
    ) -> jolzab_jolokia::Result<Vec<ReadResponse>> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), requests.len()));
        Ok(self.responses.clone())
    }
}

struct FailingJolokia;

#[async_trait]
impl JolokiaClient for FailingJolokia {
    async fn execute(
        &self,
        _endpoint: &str,
        _requests: &[ReadRequest],
    ) -> jolzab_jolokia::Result<Vec<ReadResponse>> {
        Err(JolokiaError::HttpStatus {
            status: 503,
            body: "connection refused by proxy".to_string(),
        })
    }
}

#[derive(Default)]
struct FakeSink {
    batches: Mutex<Vec<Vec<ZabbixMetric>>>,
    fail: bool,
}

impl FakeSink {
    fn batches(&self) -> Vec<Vec<ZabbixMetric>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricSink for FakeSink {
    async fn send(&self, metrics: &[ZabbixMetric]) -> jolzab_zabbix::Result<SenderResponse> {
        self.batches.lock().unwrap().push(metrics.to_vec());
        if self.fail {
            return Err(ZabbixError::Rejected {
                info: "processed: 0; failed: 2".to_string(),
            });
        }
        Ok(SenderResponse {
            response: "success".to_string(),
            info: format!("processed: {}; failed: 0", metrics.len()),
        })
    }
}

/// Sink that parks inside `send` until released, to exercise the
/// per-target overlap guard.
struct GatedSink {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

impl GatedSink {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MetricSink for GatedSink {
    async fn send(&self, metrics: &[ZabbixMetric]) -> jolzab_zabbix::Result<SenderResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(SenderResponse {
            response: "success".to_string(),
            info: format!("processed: {}; failed: 0", metrics.len()),
        })
    }
}

fn forwarder_with(
    config: Arc<BridgeConfig>,
    client: Arc<dyn JolokiaClient>,
    sink: Arc<dyn MetricSink>,
) -> Forwarder {
    let poller = Poller::new(Arc::clone(&config), client);
    Forwarder::new(config, poller, sink, "bridge-host")
}

// ── Poll executor ──

#[tokio::test]
async fn poll_maps_mixed_statuses_to_value_and_sentinel() {
    let client = Arc::new(FakeJolokia::new(vec![
        ReadResponse {
            status: 200,
            value: Some(json!("42")),
            error: None,
        },
        ReadResponse {
            status: 500,
            value: None,
            error: Some("internal error".to_string()),
        },
    ]));
    let poller = Poller::new(fixture(), client.clone());

    let samples = poller.poll("db").await.unwrap();

    assert_eq!(samples.len(), 2, "a failed attribute is never omitted");
    assert_eq!(samples[0].key, "db.java_lang:type_Memory.HeapMemoryUsage.used");
    assert_eq!(samples[0].value, json!("42"));
    assert_eq!(samples[1].key, "db.java_lang:type_Threading.ThreadCount.");
    assert_eq!(samples[1].value, json!("Err"));
    // The whole batch went out as one round trip of both requests.
    assert_eq!(client.calls.lock().unwrap()[0].1, 2);
}

#[tokio::test]
async fn poll_unknown_target_makes_no_network_call() {
    let client = Arc::new(FakeJolokia::new(Vec::new()));
    let poller = Poller::new(fixture(), client.clone());

    let samples = poller.poll("nonexistent").await.unwrap();

    assert!(samples.is_empty());
    assert_eq!(client.call_count(), 0);
}

// ── Forwarder ──

#[tokio::test]
async fn send_appends_exactly_one_discovery_metric() {
    let config = fixture();
    let client = Arc::new(FakeJolokia::new(vec![
        ReadResponse {
            status: 200,
            value: Some(json!(512)),
            error: None,
        },
        ReadResponse {
            status: 200,
            value: Some(json!(37)),
            error: None,
        },
    ]));
    let sink = Arc::new(FakeSink::default());
    let forwarder = forwarder_with(Arc::clone(&config), client, sink.clone());

    forwarder.send("db").await.unwrap();

    let batches = sink.batches();
    assert_eq!(batches.len(), 1, "one sink call per cycle");
    let batch = &batches[0];
    assert_eq!(batch.len(), 3);
    let discovery: Vec<&ZabbixMetric> = batch.iter().filter(|m| m.key == DISCOVERY_KEY).collect();
    assert_eq!(discovery.len(), 1);
    assert_eq!(discovery[0].value, config.discovery_payload());
    assert!(batch.iter().all(|m| m.host == "bridge-host"));
}

#[tokio::test]
async fn send_with_zero_regular_samples_still_sends_discovery() {
    let config = Arc::new(
        BridgeConfig::parse("- key: idle\n  endpoint: http://idle:8778/jolokia/\n  poll-frequency: 30\n")
            .unwrap(),
    );
    let sink = Arc::new(FakeSink::default());
    let forwarder = forwarder_with(
        Arc::clone(&config),
        Arc::new(FakeJolokia::new(Vec::new())),
        sink.clone(),
    );

    forwarder.send("idle").await.unwrap();

    let batches = sink.batches();
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].key, DISCOVERY_KEY);
}

#[tokio::test]
async fn transport_failure_skips_the_whole_cycle() {
    let sink = Arc::new(FakeSink::default());
    let forwarder = forwarder_with(fixture(), Arc::new(FailingJolokia), sink.clone());

    let err = forwarder.send("db").await.unwrap_err();

    assert!(matches!(err, ForwardError::Poll(_)));
    assert!(sink.batches().is_empty(), "nothing reaches the sink, discovery included");
}

#[tokio::test]
async fn sink_failure_surfaces_as_forward_error() {
    let sink = Arc::new(FakeSink {
        batches: Mutex::new(Vec::new()),
        fail: true,
    });
    let client = Arc::new(FakeJolokia::new(vec![ReadResponse {
        status: 200,
        value: Some(json!(1)),
        error: None,
    }]));
    let forwarder = forwarder_with(fixture(), client, sink);

    let err = forwarder.send("db").await.unwrap_err();
    assert!(matches!(err, ForwardError::Sink(_)));
}

// ── Scheduler ──

#[test]
fn due_entries_follow_modulo_schedule_over_35_ticks() {
    let schedule = vec![
        ScheduleEntry {
            key: "a".to_string(),
            frequency_secs: 5,
        },
        ScheduleEntry {
            key: "b".to_string(),
            frequency_secs: 7,
        },
    ];

    let mut a_dispatches = Vec::new();
    let mut b_dispatches = Vec::new();
    for epoch in 1..=35 {
        for entry in due_entries(&schedule, epoch) {
            match entry.key.as_str() {
                "a" => a_dispatches.push(epoch),
                "b" => b_dispatches.push(epoch),
                _ => unreachable!(),
            }
        }
    }

    assert_eq!(a_dispatches, vec![5, 10, 15, 20, 25, 30, 35]);
    assert_eq!(b_dispatches, vec![7, 14, 21, 28, 35]);
}

#[tokio::test]
async fn scheduler_never_schedules_unresolved_targets() {
    let config = Arc::new(
        BridgeConfig::parse(
            "- key: db\n  endpoint: http://db:8778/jolokia/\n  poll-frequency: 10\n- key: web\n  endpoint: http://web:8778/jolokia/\n",
        )
        .unwrap(),
    );
    let forwarder = Arc::new(forwarder_with(
        Arc::clone(&config),
        Arc::new(FakeJolokia::new(Vec::new())),
        Arc::new(FakeSink::default()),
    ));

    let scheduler = PollScheduler::new(&config, forwarder);

    assert_eq!(
        scheduler.schedule(),
        &[ScheduleEntry {
            key: "db".to_string(),
            frequency_secs: 10,
        }]
    );
}

#[tokio::test]
async fn in_flight_cycle_is_skipped_not_overlapped() {
    let config = Arc::new(
        BridgeConfig::parse("- key: slow\n  endpoint: http://slow:8778/jolokia/\n  poll-frequency: 1\n")
            .unwrap(),
    );
    let sink = Arc::new(GatedSink::new());
    let forwarder = Arc::new(forwarder_with(
        Arc::clone(&config),
        Arc::new(FakeJolokia::new(Vec::new())),
        sink.clone(),
    ));
    let scheduler = PollScheduler::new(&config, forwarder);

    scheduler.dispatch_due(100);
    sink.entered.notified().await;

    // The first cycle is parked inside the sink; the next boundary
    // must skip, not queue a second cycle.
    scheduler.dispatch_due(101);
    tokio::task::yield_now().await;
    assert_eq!(sink.calls.load(Ordering::SeqCst), 1);

    sink.release.notify_one();
}
