use crate::gc::decorator::rebase_micros;
use crate::gc::event_type::EventType;
use crate::gc::hydrator::UNNAMED_SAFEPOINT;
use crate::gc::types::LogEvent;
use crate::run::jvm_run::{JvmRun, SafepointSummary};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_UNKNOWN_SAMPLES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    NotStarted,
    Ingesting,
    Finalized,
}

/// Folds hydrated events, in arrival order, into a `JvmRun`.
#[derive(Debug)]
pub struct RunAggregator {
    events: Vec<LogEvent>,
    observed_types: BTreeSet<EventType>,
    safepoints: Vec<SafepointSummary>,
    blocking_pause_count: u64,
    blocking_pause_total_us: u64,
    blocking_pause_max_us: u64,
    unknown_count: u64,
    unknown_samples: Vec<String>,
    max_unknown_samples: usize,
}

impl Default for RunAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNKNOWN_SAMPLES)
    }
}

impl RunAggregator {
    pub fn new(max_unknown_samples: usize) -> Self {
        Self {
            events: Vec::new(),
            observed_types: BTreeSet::new(),
            safepoints: Vec::new(),
            blocking_pause_count: 0,
            blocking_pause_total_us: 0,
            blocking_pause_max_us: 0,
            unknown_count: 0,
            unknown_samples: Vec::new(),
            max_unknown_samples,
        }
    }

    pub fn state(&self) -> PipelineState {
        if self.events.is_empty() {
            PipelineState::NotStarted
        } else {
            PipelineState::Ingesting
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: LogEvent) {
        self.observed_types.insert(event.event_type);

        if event.event_type.is_safepoint() {
            let name = event.operation.as_deref().unwrap_or(UNNAMED_SAFEPOINT);
            let pause_us = event.duration_us.unwrap_or(0);
            match self.safepoints.iter_mut().find(|summary| summary.name == name) {
                Some(summary) => summary.record(pause_us),
                None => {
                    let mut summary = SafepointSummary::new(name);
                    summary.record(pause_us);
                    self.safepoints.push(summary);
                }
            }
        }

        if event.is_blocking() {
            let pause_us = event.duration_us.unwrap_or(0);
            self.blocking_pause_count += 1;
            self.blocking_pause_total_us = self.blocking_pause_total_us.saturating_add(pause_us);
            self.blocking_pause_max_us = self.blocking_pause_max_us.max(pause_us);
        }

        if event.event_type == EventType::Unknown {
            if self.unknown_count == 0 {
                warn!(line = %event.raw_text, "unrecognized log line");
            }
            self.unknown_count += 1;
            if self.unknown_samples.len() < self.max_unknown_samples {
                self.unknown_samples.push(event.raw_text.clone());
            }
        }

        self.events.push(event);
    }

    pub fn finish(self) -> JvmRun {
        self.finish_with_origin(None)
    }

    /// Freezes the run. With an uptime `origin`, wall-clock stamps recorded before the
    /// origin was known are first moved onto the uptime timeline.
    pub fn finish_with_origin(mut self, origin: Option<DateTime<FixedOffset>>) -> JvmRun {
        if let Some(origin) = origin {
            let mut rebased = 0;
            for event in self.events.iter_mut().filter(|event| event.wall_clock) {
                event.timestamp_us = rebase_micros(origin, event.timestamp_us);
                event.wall_clock = false;
                rebased += 1;
            }
            if rebased > 0 {
                debug!(rebased, %origin, "rebased wall-clock stamps onto uptime");
            }
        }

        let timeline = Timeline::scan(&self.events);
        let run_duration_us = match (timeline.first_timestamp_us, timeline.last_blocking) {
            (Some(first), Some((_, last_end))) => last_end.saturating_sub(first),
            _ => 0,
        };
        let throughput = throughput(self.blocking_pause_total_us, run_duration_us);

        info!(
            events = self.events.len(),
            blocking_pauses = self.blocking_pause_count,
            unknown = self.unknown_count,
            throughput,
            "run finalized"
        );

        JvmRun {
            events: self.events,
            observed_types: self.observed_types,
            safepoints: self.safepoints,
            blocking_pause_count: self.blocking_pause_count,
            blocking_pause_total_us: self.blocking_pause_total_us,
            blocking_pause_max_us: self.blocking_pause_max_us,
            first_timestamp_us: timeline.first_timestamp_us,
            last_timestamp_us: timeline.last_blocking.map(|(start, _)| start),
            run_duration_us,
            throughput,
            unknown_count: self.unknown_count,
            unknown_samples: self.unknown_samples,
            ordering_anomalies: timeline.ordering_anomalies,
        }
    }
}

/// Statistics that depend on where events sit in time.
#[derive(Debug, Default)]
struct Timeline {
    first_timestamp_us: Option<u64>,
    // Start and end of the blocking event that ends last.
    last_blocking: Option<(u64, u64)>,
    ordering_anomalies: Vec<usize>,
}

impl Timeline {
    fn scan(events: &[LogEvent]) -> Self {
        let mut timeline = Self::default();
        let mut latest_end_us = None;

        for (index, event) in events.iter().enumerate() {
            if event.event_type.is_timed() {
                let end_us = event.end_us();
                match latest_end_us {
                    Some(latest) if end_us < latest => {
                        warn!(
                            index,
                            end_us,
                            latest_us = latest,
                            "event completes before an earlier event"
                        );
                        timeline.ordering_anomalies.push(index);
                    }
                    _ => latest_end_us = Some(end_us),
                }
            }

            if event.is_blocking() {
                let start = event.timestamp_us;
                timeline.first_timestamp_us = Some(
                    timeline
                        .first_timestamp_us
                        .map_or(start, |first| first.min(start)),
                );
                let end = event.end_us();
                if timeline
                    .last_blocking
                    .map_or(true, |(_, last_end)| end >= last_end)
                {
                    timeline.last_blocking = Some((start, end));
                }
            }
        }

        timeline
    }
}

fn throughput(blocking_total_us: u64, run_duration_us: u64) -> f64 {
    if blocking_total_us == 0 {
        return 1.0;
    }
    if run_duration_us == 0 {
        return 0.0;
    }
    (1.0 - blocking_total_us as f64 / run_duration_us as f64).clamp(0.0, 1.0)
}
