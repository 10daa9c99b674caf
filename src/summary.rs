use crate::gc::event_type::EventType;
use crate::run::jvm_run::{Bottleneck, JvmRun, SafepointSummary};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Conditions the report must surface to the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    UnknownLines { count: u64, samples: Vec<String> },
    OrderingAnomalies { count: usize },
    LowThroughput { throughput_percent: f64, threshold_percent: f64 },
    Bottlenecks { count: usize, threshold_percent: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownLines { count, .. } => {
                write!(f, "{} unrecognized line(s); the log contains GC activity this tool does not understand", count)
            }
            Warning::OrderingAnomalies { count } => {
                write!(f, "{} event(s) stamped earlier than a preceding event", count)
            }
            Warning::LowThroughput {
                throughput_percent,
                threshold_percent,
            } => write!(
                f,
                "throughput {:.2}% is below the {:.2}% threshold",
                throughput_percent, threshold_percent
            ),
            Warning::Bottlenecks {
                count,
                threshold_percent,
            } => write!(
                f,
                "{} pause(s) with window throughput under {:.2}%",
                count, threshold_percent
            ),
        }
    }
}

/// Read-only digest of a finalized run, for text or JSON reporting.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub event_count: usize,
    pub collectors: Vec<String>,
    pub observed_types: Vec<EventType>,
    pub blocking_pause_count: u64,
    pub blocking_pause_total_us: u64,
    pub blocking_pause_max_us: u64,
    pub run_duration_us: u64,
    pub throughput_percent: f64,
    pub safepoints: Vec<SafepointSummary>,
    pub bottlenecks: Vec<Bottleneck>,
    pub warnings: Vec<Warning>,
}

impl RunSummary {
    pub fn from_run(run: &JvmRun, threshold_percent: f64) -> Self {
        let throughput_percent = run.throughput() * 100.0;
        let bottlenecks = run.bottlenecks(threshold_percent);

        let mut warnings = Vec::new();
        if run.has_unknown() {
            warnings.push(Warning::UnknownLines {
                count: run.unknown_count(),
                samples: run.unknown_samples().to_vec(),
            });
        }
        if !run.ordering_anomalies().is_empty() {
            warnings.push(Warning::OrderingAnomalies {
                count: run.ordering_anomalies().len(),
            });
        }
        if throughput_percent < threshold_percent {
            warnings.push(Warning::LowThroughput {
                throughput_percent,
                threshold_percent,
            });
        }
        if !bottlenecks.is_empty() {
            warnings.push(Warning::Bottlenecks {
                count: bottlenecks.len(),
                threshold_percent,
            });
        }

        Self {
            event_count: run.events().len(),
            collectors: run.collectors().iter().map(|c| c.to_string()).collect(),
            observed_types: run.observed_types().iter().copied().collect(),
            blocking_pause_count: run.blocking_pause_count(),
            blocking_pause_total_us: run.blocking_pause_total_us(),
            blocking_pause_max_us: run.blocking_pause_max_us(),
            run_duration_us: run.run_duration_us(),
            throughput_percent,
            safepoints: run.safepoints().to_vec(),
            bottlenecks,
            warnings,
        }
    }
}

fn micros(us: u64) -> humantime::FormattedDuration {
    humantime::format_duration(Duration::from_micros(us))
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let collectors = if self.collectors.is_empty() {
            "none".to_string()
        } else {
            self.collectors.join(", ")
        };

        writeln!(f, "events: {}", self.event_count)?;
        writeln!(f, "collectors: {}", collectors)?;
        writeln!(
            f,
            "blocking pauses: {} (total {}, max {})",
            self.blocking_pause_count,
            micros(self.blocking_pause_total_us),
            micros(self.blocking_pause_max_us)
        )?;
        writeln!(f, "run duration: {}", micros(self.run_duration_us))?;
        writeln!(f, "throughput: {:.2}%", self.throughput_percent)?;

        if !self.safepoints.is_empty() {
            writeln!(f, "safepoints:")?;
            for safepoint in &self.safepoints {
                writeln!(
                    f,
                    "  {}: count {}, total {}, max {}",
                    safepoint.name,
                    safepoint.count,
                    micros(safepoint.pause_total_us),
                    micros(safepoint.pause_max_us)
                )?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  - {}", warning)?;
            }
        }

        Ok(())
    }
}
