use crate::forwarder::Forwarder;
use chrono::Utc;
use jolzab_config::BridgeConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{interval, Duration};

/// One scheduled target: key plus resolved poll frequency in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub key: String,
    pub frequency_secs: u64,
}

/// Targets due at the given epoch second: those whose frequency evenly
/// divides it. Missed boundaries are never caught up; a tick that
/// falls between boundaries simply dispatches nothing for that target.
pub fn due_entries(schedule: &[ScheduleEntry], epoch: i64) -> Vec<&ScheduleEntry> {
    schedule
        .iter()
        .filter(|e| epoch % e.frequency_secs as i64 == 0)
        .collect()
}

/// Drives the polling loop: ticks once per second and fans out one
/// poll-and-send cycle per due target.
///
/// Cycles run on spawned tasks, so one target's slow or failing cycle
/// never blocks another's. A target whose previous cycle is still in
/// flight is skipped for that boundary rather than overlapped.
pub struct PollScheduler {
    schedule: Vec<ScheduleEntry>,
    forwarder: Arc<Forwarder>,
    in_flight: HashMap<String, Arc<Mutex<()>>>,
}

impl PollScheduler {
    /// Resolves the `(key, frequency)` schedule once from the target
    /// list. Targets without a resolvable frequency are logged and
    /// never scheduled.
    pub fn new(config: &BridgeConfig, forwarder: Arc<Forwarder>) -> Self {
        let mut schedule = Vec::new();
        for key in config.keys() {
            match config.poll_frequency(key) {
                Some(frequency_secs) => schedule.push(ScheduleEntry {
                    key: key.to_string(),
                    frequency_secs,
                }),
                None => {
                    tracing::warn!(key, "No poll frequency resolved, target will not be polled");
                }
            }
        }
        let in_flight = schedule
            .iter()
            .map(|e| (e.key.clone(), Arc::new(Mutex::new(()))))
            .collect();
        Self {
            schedule,
            forwarder,
            in_flight,
        }
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.schedule
    }

    /// Runs until the process is terminated.
    pub async fn run(&self) {
        tracing::info!(targets = self.schedule.len(), "Poll scheduler started");
        let mut tick = interval(Duration::from_secs(1));
        loop {
            tick.tick().await;
            self.dispatch_due(Utc::now().timestamp());
        }
    }

    pub(crate) fn dispatch_due(&self, epoch: i64) {
        for entry in due_entries(&self.schedule, epoch) {
            let Some(guard) = self.in_flight.get(&entry.key) else {
                continue;
            };
            let Ok(permit) = Arc::clone(guard).try_lock_owned() else {
                tracing::warn!(key = %entry.key, "Previous cycle still in flight, skipping this one");
                continue;
            };
            let forwarder = Arc::clone(&self.forwarder);
            let key = entry.key.clone();
            tokio::spawn(async move {
                let _permit = permit;
                if let Err(e) = forwarder.send(&key).await {
                    tracing::warn!(key = %key, error = %e, "Poll cycle failed");
                }
            });
        }
    }
}
