use crate::gc::decorator::{parse_decimal, seconds_to_micros, TimelineAnchor};
use crate::gc::event_type::{EventFamily, EventType};
use crate::gc::memory::MemoryDelta;
use crate::gc::recognizer::expand;
use crate::gc::trigger::Trigger;
use crate::gc::types::{
    CpuTimes, Generation, LogEvent, LogicalLine, RegionDelta, RegionDeltas, StampPosition,
};
use once_cell::sync::Lazy;
use regex::Regex;

static DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+[.,]\d+)\s?(ms|secs|s)\b").unwrap());

static SECONDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+[.,]\d+) seconds").unwrap());

static SAFEPOINT_TOTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Total: (\d+) ns").unwrap());

static SAFEPOINT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^Safepoint "([^"]+)""#).unwrap());

static CPU: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)user=(\d+[.,]\d+)s?,? sys=(\d+[.,]\d+)s?,? real=(\d+[.,]\d+)").unwrap()
});

// CPU clauses are stripped before searching for the pause duration.
static CPU_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(?:\[Times: [^\]]*\]|User=\S+ Sys=\S+ Real=\S+)").unwrap()
});

static REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&expand(
        r"(?:(?P<label>DefNew|ParNew|Tenured|CMS Perm ?|CMS|PSYoungGen|ParOldGen|PSOldGen|PSPermGen|Perm|Metaspace|NonClass|Class|Eden|From|To|Heap|Humongous)(?: \((?:promotion failed|concurrent mode failure)\))?: )?(?P<delta>{D})",
    ))
    .unwrap()
});

/// Name under which safepoint lines without an operation name are summarized.
pub const UNNAMED_SAFEPOINT: &str = "Unknown";

/// Turns classified logical lines into events on one normalized timeline.
#[derive(Debug, Default)]
pub struct Hydrator {
    anchor: TimelineAnchor,
}

impl Hydrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> &TimelineAnchor {
        &self.anchor
    }

    pub fn hydrate(&mut self, line: LogicalLine, event_type: EventType) -> LogEvent {
        let body = line.body.as_str();

        let duration_us = if event_type.is_timed() {
            duration_for(event_type, body)
        } else {
            None
        };

        let instant = line
            .decorator
            .as_ref()
            .and_then(|decorator| self.anchor.resolve(decorator));
        let decorated_us = instant.map_or(0, |instant| instant.micros);
        let timestamp_us = match (line.stamp, duration_us) {
            (StampPosition::End, Some(duration)) => decorated_us.saturating_sub(duration),
            _ => decorated_us,
        };

        let trigger = if event_type.has_trigger() {
            Trigger::find_in(body)
        } else {
            None
        };

        let regions = match event_type.family() {
            EventFamily::Pause | EventFamily::Concurrent => parse_regions(body),
            _ => None,
        };

        let operation = if event_type.is_safepoint() {
            Some(
                SAFEPOINT_NAME
                    .captures(body)
                    .map(|caps| caps[1].to_string())
                    .unwrap_or_else(|| UNNAMED_SAFEPOINT.to_string()),
            )
        } else {
            None
        };

        LogEvent {
            event_type,
            timestamp_us,
            wall_clock: instant.map_or(false, |instant| instant.absolute),
            duration_us,
            trigger,
            regions,
            cpu: parse_cpu(body),
            operation,
            raw_text: line.text,
        }
    }
}

fn duration_for(event_type: EventType, body: &str) -> Option<u64> {
    match event_type {
        EventType::UnifiedSafepoint => {
            let nanos: u64 = SAFEPOINT_TOTAL.captures(body)?[1].parse().ok()?;
            Some(nanos.saturating_add(500) / 1_000)
        }
        EventType::ApplicationStopped | EventType::ApplicationConcurrentTime => {
            let seconds = parse_decimal(&SECONDS.captures(body)?[1])?;
            Some(seconds_to_micros(seconds))
        }
        _ => parse_duration_us(body),
    }
}

/// The outermost duration on a line: the last one printed outside the CPU clause.
pub fn parse_duration_us(body: &str) -> Option<u64> {
    let stripped = CPU_CLAUSE.replace_all(body, "");
    let caps = DURATION.captures_iter(&stripped).last()?;
    let value = parse_decimal(&caps[1])?;
    match &caps[2] {
        "ms" => Some(millis_to_micros(value)),
        _ => Some(seconds_to_micros(value)),
    }
}

fn millis_to_micros(millis: f64) -> u64 {
    if millis.is_finite() && millis > 0.0 {
        (millis * 1_000.0).round() as u64
    } else {
        0
    }
}

/// Labeled size deltas in line order, then the whole-heap total: the last unlabeled
/// figure on the line.
pub fn parse_regions(body: &str) -> Option<RegionDeltas> {
    let mut deltas = Vec::new();
    let mut combined = None;
    for caps in REGION.captures_iter(body) {
        let Some(delta) = caps.name("delta").and_then(|m| MemoryDelta::parse(m.as_str())) else {
            continue;
        };
        match caps.name("label") {
            Some(label) => {
                if let Some(generation) = Generation::from_label(label.as_str().trim()) {
                    deltas.push(region_delta(generation, delta));
                }
            }
            None => combined = Some(delta),
        }
    }
    if let Some(delta) = combined {
        deltas.push(region_delta(Generation::Combined, delta));
    }
    if deltas.is_empty() {
        None
    } else {
        Some(RegionDeltas::new(deltas))
    }
}

fn region_delta(generation: Generation, delta: MemoryDelta) -> RegionDelta {
    RegionDelta {
        generation,
        occupancy_before: delta.before,
        occupancy_after: delta.after,
        capacity: delta.capacity,
    }
}

pub fn parse_cpu(body: &str) -> Option<CpuTimes> {
    let caps = CPU.captures(body)?;
    Some(CpuTimes {
        user_s: parse_decimal(&caps[1])?,
        sys_s: parse_decimal(&caps[2])?,
        real_s: parse_decimal(&caps[3])?,
    })
}
