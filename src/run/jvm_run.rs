use crate::gc::event_type::{Collector, EventFamily, EventType};
use crate::gc::types::LogEvent;
use serde::Serialize;
use std::collections::BTreeSet;

/// Pause statistics for one safepoint operation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafepointSummary {
    pub name: String,
    pub count: u64,
    pub pause_total_us: u64,
    pub pause_max_us: u64,
}

impl SafepointSummary {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            count: 0,
            pause_total_us: 0,
            pause_max_us: 0,
        }
    }

    pub(crate) fn record(&mut self, pause_us: u64) {
        self.count += 1;
        self.pause_total_us = self.pause_total_us.saturating_add(pause_us);
        self.pause_max_us = self.pause_max_us.max(pause_us);
    }

    pub fn average_us(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.pause_total_us / self.count
        }
    }
}

/// A pause whose surrounding window left the application too little run time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bottleneck {
    /// Index of the later pause in `JvmRun::events`.
    pub index: usize,
    pub timestamp_us: u64,
    /// Share of the window between two consecutive pauses not spent paused.
    pub throughput_percent: f64,
}

/// A fully parsed GC log. Built once by the aggregator and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct JvmRun {
    pub(crate) events: Vec<LogEvent>,
    pub(crate) observed_types: BTreeSet<EventType>,
    pub(crate) safepoints: Vec<SafepointSummary>,
    pub(crate) blocking_pause_count: u64,
    pub(crate) blocking_pause_total_us: u64,
    pub(crate) blocking_pause_max_us: u64,
    pub(crate) first_timestamp_us: Option<u64>,
    pub(crate) last_timestamp_us: Option<u64>,
    pub(crate) run_duration_us: u64,
    pub(crate) throughput: f64,
    pub(crate) unknown_count: u64,
    pub(crate) unknown_samples: Vec<String>,
    pub(crate) ordering_anomalies: Vec<usize>,
}

impl JvmRun {
    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<LogEvent> {
        self.events
    }

    pub fn observed_types(&self) -> &BTreeSet<EventType> {
        &self.observed_types
    }

    pub fn has_observed(&self, event_type: EventType) -> bool {
        self.observed_types.contains(&event_type)
    }

    /// Safepoint summaries in the order their operations were first seen.
    pub fn safepoints(&self) -> &[SafepointSummary] {
        &self.safepoints
    }

    pub fn safepoint(&self, name: &str) -> Option<&SafepointSummary> {
        self.safepoints.iter().find(|summary| summary.name == name)
    }

    pub fn blocking_pause_count(&self) -> u64 {
        self.blocking_pause_count
    }

    pub fn blocking_pause_total_us(&self) -> u64 {
        self.blocking_pause_total_us
    }

    pub fn blocking_pause_max_us(&self) -> u64 {
        self.blocking_pause_max_us
    }

    /// Start of the first blocking event.
    pub fn first_timestamp_us(&self) -> Option<u64> {
        self.first_timestamp_us
    }

    /// Start of the blocking event that ends last.
    pub fn last_timestamp_us(&self) -> Option<u64> {
        self.last_timestamp_us
    }

    pub fn run_duration_us(&self) -> u64 {
        self.run_duration_us
    }

    /// Fraction of the run the application was not stopped, in `[0, 1]`.
    pub fn throughput(&self) -> f64 {
        self.throughput
    }

    /// Whether any line escaped classification. Callers must surface this.
    pub fn has_unknown(&self) -> bool {
        self.unknown_count > 0
    }

    pub fn unknown_count(&self) -> u64 {
        self.unknown_count
    }

    pub fn unknown_samples(&self) -> &[String] {
        &self.unknown_samples
    }

    /// Indices of timed events whose end instant falls before the end of an earlier event.
    pub fn ordering_anomalies(&self) -> &[usize] {
        &self.ordering_anomalies
    }

    pub fn collectors(&self) -> BTreeSet<Collector> {
        self.observed_types
            .iter()
            .filter_map(|event_type| event_type.collector())
            .collect()
    }

    /// Pauses that, together with the pause before them, held the application's share of
    /// the window below `threshold_percent`.
    pub fn bottlenecks(&self, threshold_percent: f64) -> Vec<Bottleneck> {
        let mut bottlenecks = Vec::new();
        let mut previous: Option<&LogEvent> = None;

        for (index, event) in self.events.iter().enumerate() {
            if event.event_type.family() != EventFamily::Pause {
                continue;
            }
            if let Some(prev) = previous {
                let window = event.end_us().saturating_sub(prev.timestamp_us);
                if window > 0 {
                    let paused = prev
                        .duration_us
                        .unwrap_or(0)
                        .saturating_add(event.duration_us.unwrap_or(0));
                    let throughput = (1.0 - paused as f64 / window as f64).clamp(0.0, 1.0);
                    let throughput_percent = throughput * 100.0;
                    if throughput_percent < threshold_percent {
                        bottlenecks.push(Bottleneck {
                            index,
                            timestamp_us: event.timestamp_us,
                            throughput_percent,
                        });
                    }
                }
            }
            previous = Some(event);
        }

        bottlenecks
    }
}
