//! Metrics collection for the link removal pipeline
//! Author: kartik4091
//! Created: 2025-06-07

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Counter and timer registry for pipeline runs
pub struct Metrics {
    counters: Arc<RwLock<HashMap<String, u64>>>,
    timers: Arc<RwLock<HashMap<String, Duration>>>,
    start_times: Arc<RwLock<HashMap<String, Instant>>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(RwLock::new(HashMap::new())),
            timers: Arc::new(RwLock::new(HashMap::new())),
            start_times: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        let mut counters = self.counters.write();
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    pub fn start_timer(&self, name: &str) {
        let mut start_times = self.start_times.write();
        start_times.insert(name.to_string(), Instant::now());
    }

    pub fn end_timer(&self, name: &str) {
        if let Some(start_time) = self.start_times.write().remove(name) {
            let duration = start_time.elapsed();
            let mut timers = self.timers.write();
            timers.insert(name.to_string(), duration);
        }
    }

    pub fn get_counter(&self, name: &str) -> u64 {
        self.counters.read().get(name).copied().unwrap_or(0)
    }

    pub fn get_timer(&self, name: &str) -> Option<Duration> {
        self.timers.read().get(name).copied()
    }

    pub fn reset(&self) {
        self.counters.write().clear();
        self.timers.write().clear();
        self.start_times.write().clear();
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self.counters.read().clone(),
            timers: self.timers.read().clone(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub counters: HashMap<String, u64>,
    pub timers: HashMap<String, Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = Metrics::new();
        metrics.increment_counter("files.processed");
        metrics.add_to_counter("links.removed", 5);
        metrics.add_to_counter("links.removed", 2);

        assert_eq!(metrics.get_counter("files.processed"), 1);
        assert_eq!(metrics.get_counter("links.removed"), 7);
        assert_eq!(metrics.get_counter("unknown"), 0);
    }
}
