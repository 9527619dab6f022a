//! Replay harness: decode a message file repeatedly and report throughput.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};
use uplink_core::{RawMessage, DEFAULT_DECODER};

/// Outcome of a replay run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl ReplaySummary {
    pub fn per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total as f64 / secs
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total: {}, ok: {}, failed: {}, elapsed: {} ms, rate: {:.0} msg/s",
            self.total,
            self.ok,
            self.failed,
            self.elapsed.as_millis(),
            self.per_second()
        )
    }
}

/// Read a JSON Lines message file. Blank lines are skipped.
pub fn load_messages(path: &Path) -> Result<Vec<RawMessage>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read message file {}", path.display()))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid message on line {}", n + 1))
        })
        .collect()
}

/// Decode every message `iterations` times spread across `workers` blocking tasks.
pub async fn run(
    messages: Vec<RawMessage>,
    iterations: usize,
    workers: usize,
) -> Result<ReplaySummary> {
    let messages = Arc::new(messages);
    let total = messages.len().checked_mul(iterations).with_context(|| {
        format!(
            "Replay size overflows: {} messages x {} iterations",
            messages.len(),
            iterations
        )
    })?;
    let workers = workers.max(1);
    let ok = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    info!(
        "Replaying {} messages x {} iterations on {} workers",
        messages.len(),
        iterations,
        workers
    );

    let started = Instant::now();
    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let messages = Arc::clone(&messages);
        let ok = Arc::clone(&ok);
        let failed = Arc::clone(&failed);
        handles.push(tokio::task::spawn_blocking(move || {
            for i in (worker..total).step_by(workers) {
                let index = i % messages.len();
                match DEFAULT_DECODER.decode_message(&messages[index]) {
                    Ok(_) => {
                        ok.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        debug!("Message {} failed: {}", index, e);
                        failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        }));
    }

    for handle in handles {
        handle.await.context("Replay worker panicked")?;
    }

    Ok(ReplaySummary {
        total,
        ok: ok.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
        elapsed: started.elapsed(),
    })
}
