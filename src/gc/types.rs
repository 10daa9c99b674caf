use crate::gc::decorator::{Decorator, LogStyle};
use crate::gc::event_type::EventType;
use crate::gc::memory::Memory;
use crate::gc::trigger::Trigger;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Generation {
    Young,
    Old,
    /// Metaspace / permanent generation.
    Class,
    /// Whole-heap figures.
    Combined,
    Humongous,
}

impl Generation {
    /// Maps the label printed before a size delta to its generation.
    pub fn from_label(label: &str) -> Option<Generation> {
        match label {
            "DefNew" | "ParNew" | "PSYoungGen" | "Eden" | "From" | "To" | "Young" => Some(Generation::Young),
            "Tenured" | "CMS" | "ParOldGen" | "PSOldGen" | "Old" => Some(Generation::Old),
            "Metaspace" | "Perm" | "PSPermGen" | "CMS Perm" | "Class Space" => {
                Some(Generation::Class)
            }
            "Heap" => Some(Generation::Combined),
            "Humongous" => Some(Generation::Humongous),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionDelta {
    pub generation: Generation,
    pub occupancy_before: Memory,
    pub occupancy_after: Memory,
    pub capacity: Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegionDeltas(Vec<RegionDelta>);

impl RegionDeltas {
    pub fn new(deltas: Vec<RegionDelta>) -> Self {
        Self(deltas)
    }

    /// First entry for a generation.
    pub fn get(&self, generation: Generation) -> Option<&RegionDelta> {
        self.0.iter().find(|delta| delta.generation == generation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionDelta> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuTimes {
    pub user_s: f64,
    pub sys_s: f64,
    pub real_s: f64,
}

impl CpuTimes {
    /// Summed CPU time over wall-clock time, as a rounded percentage.
    ///
    /// A zero wall-clock time cannot be measured and yields `i32::MAX`.
    pub fn parallelism_percent(&self) -> i32 {
        if self.real_s == 0.0 {
            return i32::MAX;
        }
        let percent = ((self.user_s + self.sys_s) / self.real_s * 100.0).round();
        if percent >= i32::MAX as f64 {
            i32::MAX
        } else {
            percent as i32
        }
    }

    /// More wall-clock than CPU time: threads were waiting rather than working.
    pub fn is_inverted_parallelism(&self) -> bool {
        self.parallelism_percent() < 100
    }
}

/// Which end of the event the line's decorator denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StampPosition {
    Start,
    End,
}

/// One classifiable record: a physical line, or several merged by the preprocessor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalLine {
    pub decorator: Option<Decorator>,
    pub style: LogStyle,
    pub stamp: StampPosition,
    /// Message text without the decorator prefix.
    pub body: String,
    /// Full text, continuation bodies joined with single spaces.
    pub text: String,
}

/// A hydrated GC log event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    pub event_type: EventType,
    /// Start of the event in microseconds.
    pub timestamp_us: u64,
    /// `timestamp_us` counts from the Unix epoch because no uptime origin was known.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wall_clock: bool,
    pub duration_us: Option<u64>,
    pub trigger: Option<Trigger>,
    pub regions: Option<RegionDeltas>,
    pub cpu: Option<CpuTimes>,
    /// Safepoint operation name, for safepoint events.
    pub operation: Option<String>,
    pub raw_text: String,
}

impl LogEvent {
    pub fn is_blocking(&self) -> bool {
        self.event_type.is_blocking()
    }

    /// End of the event in microseconds.
    pub fn end_us(&self) -> u64 {
        self.timestamp_us
            .saturating_add(self.duration_us.unwrap_or(0))
    }

    pub fn parallelism_percent(&self) -> Option<i32> {
        self.cpu.map(|cpu| cpu.parallelism_percent())
    }

    pub fn region(&self, generation: Generation) -> Option<&RegionDelta> {
        self.regions.as_ref()?.get(generation)
    }
}
