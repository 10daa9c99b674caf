use chrono::{DateTime, Duration, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BRACKET_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\[\]]*)\]").unwrap());

static UPTIME_SECONDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+[.,]\d+)s$").unwrap());

static UPTIME_MILLIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)ms$").unwrap());

static DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[.,]\d{3}[+-]\d{2}:?\d{2}$").unwrap()
});

// Level, tags, hostname, pid or tid groups that sit between the stamp and the message.
static LEVEL_OR_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+|[a-z][a-z0-9_\-]*(?:\s*,\s*[a-z0-9_]+)*)\s*$").unwrap());

static LEGACY_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<datetime>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[.,]\d{3}[+-]\d{4}): )?(?:(?P<uptime>\d+[.,]\d{3}): )?",
    )
    .unwrap()
});

/// Time elapsed since JVM start as printed by the log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Uptime {
    Seconds(f64),
    Millis(u64),
}

impl Uptime {
    pub fn as_micros(&self) -> u64 {
        match self {
            Uptime::Seconds(seconds) => seconds_to_micros(*seconds),
            Uptime::Millis(millis) => millis.saturating_mul(1_000),
        }
    }
}

/// The timestamp portion of a line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Decorator {
    UptimeSeconds(f64),
    UptimeMillis(u64),
    Datetime(DateTime<FixedOffset>),
    DatetimeAndUptime(DateTime<FixedOffset>, Uptime),
}

impl Decorator {
    pub fn uptime_micros(&self) -> Option<u64> {
        match self {
            Decorator::UptimeSeconds(seconds) => Some(seconds_to_micros(*seconds)),
            Decorator::UptimeMillis(millis) => Some(millis.saturating_mul(1_000)),
            Decorator::DatetimeAndUptime(_, uptime) => Some(uptime.as_micros()),
            Decorator::Datetime(_) => None,
        }
    }

    pub fn datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Decorator::Datetime(datetime) | Decorator::DatetimeAndUptime(datetime, _) => {
                Some(*datetime)
            }
            _ => None,
        }
    }

    fn from_parts(datetime: Option<DateTime<FixedOffset>>, uptime: Option<Uptime>) -> Option<Self> {
        match (datetime, uptime) {
            (Some(datetime), Some(uptime)) => Some(Decorator::DatetimeAndUptime(datetime, uptime)),
            (Some(datetime), None) => Some(Decorator::Datetime(datetime)),
            (None, Some(Uptime::Seconds(seconds))) => Some(Decorator::UptimeSeconds(seconds)),
            (None, Some(Uptime::Millis(millis))) => Some(Decorator::UptimeMillis(millis)),
            (None, None) => None,
        }
    }
}

/// Which logging framework produced the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogStyle {
    /// JDK 9+ unified logging: `[0.178s][info][gc] ...`
    Unified,
    /// JDK 8 and earlier: `2020-02-14T15:21:55.207-0500: 25.016: ...`
    Legacy,
    Undecorated,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    pub decorator: Option<Decorator>,
    pub style: LogStyle,
    /// Byte offset where the message body starts.
    pub body_start: usize,
}

/// Splits the decorator prefix from a physical log line.
///
/// Unified lines may carry zero, one or two stamp groups followed by level and tag
/// groups. A bracket group that is neither a stamp nor a level/tag stops the scan, so a
/// malformed stamp leaves the whole line as undecorated text.
pub fn split_prefix(line: &str) -> Prefix {
    let mut offset = 0;
    let mut datetime = None;
    let mut uptime = None;
    let mut unified = false;

    while let Some(caps) = BRACKET_GROUP.captures(&line[offset..]) {
        let content = &caps[1];
        if let Some(stamp) = parse_uptime(content) {
            uptime.get_or_insert(stamp);
        } else if DATETIME.is_match(content) {
            match parse_datetime(content) {
                Some(parsed) => {
                    datetime.get_or_insert(parsed);
                }
                None => break,
            }
        } else if !LEVEL_OR_TAGS.is_match(content) {
            break;
        }
        unified = true;
        offset += caps[0].len();
    }

    if unified {
        if line[offset..].starts_with(' ') {
            offset += 1;
        }
        return Prefix {
            decorator: Decorator::from_parts(datetime, uptime),
            style: LogStyle::Unified,
            body_start: offset,
        };
    }

    if let Some(caps) = LEGACY_PREFIX.captures(line) {
        let datetime = caps.name("datetime").and_then(|m| parse_datetime(m.as_str()));
        let uptime = caps
            .name("uptime")
            .and_then(|m| parse_decimal(m.as_str()))
            .map(Uptime::Seconds);
        if let Some(decorator) = Decorator::from_parts(datetime, uptime) {
            return Prefix {
                decorator: Some(decorator),
                style: LogStyle::Legacy,
                body_start: caps[0].len(),
            };
        }
    }

    Prefix {
        decorator: None,
        style: LogStyle::Undecorated,
        body_start: 0,
    }
}

fn parse_uptime(content: &str) -> Option<Uptime> {
    if let Some(caps) = UPTIME_SECONDS.captures(content) {
        return parse_decimal(&caps[1]).map(Uptime::Seconds);
    }
    if let Some(caps) = UPTIME_MILLIS.captures(content) {
        return caps[1].parse::<u64>().ok().map(Uptime::Millis);
    }
    None
}

fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    let normalized = text.replace(',', ".");
    DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%:z"))
        .ok()
}

/// Parses a decimal that may use a locale comma as separator.
pub(crate) fn parse_decimal(text: &str) -> Option<f64> {
    text.replace(',', ".").parse::<f64>().ok()
}

pub(crate) fn seconds_to_micros(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1_000_000.0).round() as u64
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instant {
    pub micros: u64,
    /// Microseconds since the Unix epoch rather than since JVM start.
    pub absolute: bool,
}

/// Normalizes decorators onto one timeline for a single log.
///
/// Uptime stamps are relative to JVM start. The first line carrying both a wall clock
/// and an uptime fixes the origin, after which wall-clock-only stamps are converted to
/// uptime. Wall-clock-only stamps seen before that stay absolute (microseconds since the
/// Unix epoch) and are rebased when the run is finalized.
#[derive(Debug, Default, Clone)]
pub struct TimelineAnchor {
    origin: Option<DateTime<FixedOffset>>,
}

impl TimelineAnchor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wall-clock time of JVM start, once a line has shown both clocks.
    pub fn origin(&self) -> Option<DateTime<FixedOffset>> {
        self.origin
    }

    pub fn resolve(&mut self, decorator: &Decorator) -> Option<Instant> {
        if let Decorator::DatetimeAndUptime(datetime, uptime) = decorator {
            if self.origin.is_none() {
                let micros = i64::try_from(uptime.as_micros()).unwrap_or(i64::MAX);
                self.origin = datetime.checked_sub_signed(Duration::microseconds(micros));
            }
        }

        match decorator {
            Decorator::Datetime(datetime) => Some(match self.origin {
                Some(origin) => Instant::relative(micros_since(origin, *datetime)),
                None => Instant::absolute(datetime.timestamp_micros()),
            }),
            _ => decorator.uptime_micros().map(Instant::relative),
        }
    }
}

/// Microseconds from `origin` to the epoch instant `epoch_micros`, clamped at zero.
pub fn rebase_micros(origin: DateTime<FixedOffset>, epoch_micros: u64) -> u64 {
    let epoch_micros = i64::try_from(epoch_micros).unwrap_or(i64::MAX);
    u64::try_from(epoch_micros.saturating_sub(origin.timestamp_micros())).unwrap_or(0)
}

fn micros_since(origin: DateTime<FixedOffset>, at: DateTime<FixedOffset>) -> u64 {
    at.signed_duration_since(origin)
        .num_microseconds()
        .map_or(0, |micros| micros.max(0) as u64)
}

impl Instant {
    fn relative(micros: u64) -> Self {
        Self {
            micros,
            absolute: false,
        }
    }

    fn absolute(epoch_micros: i64) -> Self {
        Self {
            micros: epoch_micros.max(0) as u64,
            absolute: true,
        }
    }
}
