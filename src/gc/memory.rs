use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use strum::{Display, EnumString};

/// Regex fragment for a size with a unit suffix, e.g. `974K`, `24.0M`, `0.0B`.
pub(crate) const MEMORY: &str = r"\d+(?:[.,]\d+)?[BbKkMmGg]";

static SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:[.,]\d+)?)([BbKkMmGg])$").unwrap());

static DELTA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({m})(?:\(({m})\))?->({m})\(({m})\)$",
        m = MEMORY
    ))
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MemoryUnit {
    #[strum(serialize = "B")]
    Bytes,
    #[strum(serialize = "K")]
    Kilobytes,
    #[strum(serialize = "M")]
    Megabytes,
    #[strum(serialize = "G")]
    Gigabytes,
}

impl MemoryUnit {
    pub fn factor(self) -> u64 {
        match self {
            MemoryUnit::Bytes => 1,
            MemoryUnit::Kilobytes => 1 << 10,
            MemoryUnit::Megabytes => 1 << 20,
            MemoryUnit::Gigabytes => 1 << 30,
        }
    }
}

/// A memory size, held in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memory {
    bytes: u64,
}

impl Memory {
    pub const ZERO: Memory = Memory { bytes: 0 };

    pub fn new(value: f64, unit: MemoryUnit) -> Self {
        let bytes = if value.is_finite() && value > 0.0 {
            (value * unit.factor() as f64).round() as u64
        } else {
            0
        };
        Self { bytes }
    }

    pub fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    pub fn kilobytes(kilobytes: u64) -> Self {
        Self::from_bytes(kilobytes.saturating_mul(MemoryUnit::Kilobytes.factor()))
    }

    pub fn megabytes(megabytes: u64) -> Self {
        Self::from_bytes(megabytes.saturating_mul(MemoryUnit::Megabytes.factor()))
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn as_kilobytes(&self) -> u64 {
        self.bytes / MemoryUnit::Kilobytes.factor()
    }

    /// Parses a single size such as `974K` or `24.0m`.
    pub fn parse(text: &str) -> Option<Memory> {
        let caps = SIZE.captures(text.trim())?;
        let value = caps[1].replace(',', ".").parse::<f64>().ok()?;
        let unit = MemoryUnit::from_str(&caps[2]).ok()?;
        Some(Memory::new(value, unit))
    }
}

impl Add for Memory {
    type Output = Memory;

    fn add(self, rhs: Memory) -> Memory {
        Memory::from_bytes(self.bytes.saturating_add(rhs.bytes))
    }
}

impl Sub for Memory {
    type Output = Memory;

    fn sub(self, rhs: Memory) -> Memory {
        Memory::from_bytes(self.bytes.saturating_sub(rhs.bytes))
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in [MemoryUnit::Gigabytes, MemoryUnit::Megabytes, MemoryUnit::Kilobytes] {
            if self.bytes >= unit.factor() && self.bytes % unit.factor() == 0 {
                return write!(f, "{}{}", self.bytes / unit.factor(), unit);
            }
        }
        write!(f, "{}{}", self.bytes, MemoryUnit::Bytes)
    }
}

/// Occupancy change across a collection: `before(capacity)->after(capacity)` or
/// `before->after(capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryDelta {
    pub before: Memory,
    pub before_capacity: Option<Memory>,
    pub after: Memory,
    pub capacity: Memory,
}

impl MemoryDelta {
    pub fn parse(text: &str) -> Option<MemoryDelta> {
        let caps = DELTA.captures(text.trim())?;
        Some(MemoryDelta {
            before: Memory::parse(&caps[1])?,
            before_capacity: match caps.get(2) {
                Some(m) => Some(Memory::parse(m.as_str())?),
                None => None,
            },
            after: Memory::parse(&caps[3])?,
            capacity: Memory::parse(&caps[4])?,
        })
    }

    pub fn reclaimed(&self) -> Memory {
        self.before - self.after
    }
}
