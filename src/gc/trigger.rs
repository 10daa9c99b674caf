use serde::Serialize;
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};

/// The stated cause of a collection, as printed in the log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, IntoStaticStr,
)]
pub enum Trigger {
    #[strum(serialize = "Allocation Failure")]
    AllocationFailure,
    #[strum(serialize = "Allocation Rate")]
    AllocationRate,
    #[strum(serialize = "Allocation Stall")]
    AllocationStall,
    #[strum(serialize = "CMS Initial Mark")]
    CmsInitialMark,
    #[strum(serialize = "CMS Final Remark")]
    CmsFinalRemark,
    #[strum(serialize = "Diagnostic Command")]
    DiagnosticCommand,
    #[strum(serialize = "Ergonomics")]
    Ergonomics,
    #[strum(serialize = "G1 Compaction Pause")]
    G1CompactionPause,
    #[strum(serialize = "G1 Evacuation Pause")]
    G1EvacuationPause,
    #[strum(serialize = "G1 Humongous Allocation")]
    G1HumongousAllocation,
    #[strum(serialize = "G1 Periodic Collection")]
    G1PeriodicCollection,
    #[strum(serialize = "G1 Preventive Collection")]
    G1PreventiveCollection,
    #[strum(serialize = "GCLocker Initiated GC")]
    GcLockerInitiatedGc,
    #[strum(serialize = "Heap Dump Initiated GC")]
    HeapDumpInitiatedGc,
    #[strum(serialize = "Heap Inspection Initiated GC")]
    HeapInspectionInitiatedGc,
    #[strum(serialize = "High Usage")]
    HighUsage,
    #[strum(serialize = "Last ditch collection")]
    LastDitchCollection,
    #[strum(serialize = "Metadata GC Clear Soft References")]
    MetadataGcClearSoftReferences,
    #[strum(serialize = "Metadata GC Threshold")]
    MetadataGcThreshold,
    #[strum(serialize = "Proactive")]
    Proactive,
    #[strum(to_string = "System.gc()", serialize = "System.gc")]
    SystemGc,
    #[strum(serialize = "Timer")]
    Timer,
    #[strum(to_string = "to-space exhausted", serialize = "to-space overflow")]
    ToSpaceExhausted,
    #[strum(serialize = "Warmup")]
    Warmup,
    #[strum(serialize = "Unknown")]
    Unknown,
}

// Parenthesized clauses that qualify a pause rather than explain it.
const QUALIFIERS: &[&str] = &[
    "Normal",
    "Concurrent Start",
    "Prepare Mixed",
    "Mixed",
    "Initial Mark",
    "young",
    "mixed",
    "initial-mark",
    "unload classes",
    "process weakrefs",
    "process refs",
    "update refs",
    "Outside of Cycle",
    "Mark",
    "Evacuation",
    "Update Refs",
    "Roots",
    "Major",
    "Minor",
];

impl Trigger {
    /// Maps the trigger text to the closed enum; anything unrecognized is `Unknown`.
    pub fn from_log_text(text: &str) -> Trigger {
        Trigger::from_str(text.trim()).unwrap_or(Trigger::Unknown)
    }

    /// Finds the cause among the parenthesized clauses of a log body.
    ///
    /// Clauses holding digits (sizes, timings, percentages) and pause qualifiers such as
    /// `(Normal)` or `(young)` are skipped. The first remaining clause is the trigger.
    pub fn find_in(body: &str) -> Option<Trigger> {
        parenthesized(body)
            .into_iter()
            .find(|clause| {
                !clause.chars().any(|c| c.is_ascii_digit()) && !QUALIFIERS.contains(clause)
            })
            .map(Trigger::from_log_text)
    }
}

fn parenthesized(body: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut rest = body;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        if let Some(inner) = after.strip_prefix("System.gc())") {
            clauses.push("System.gc()");
            rest = inner;
            continue;
        }
        match after.find([')', '(']) {
            Some(close) if after.as_bytes()[close] == b')' => {
                clauses.push(&after[..close]);
                rest = &after[close + 1..];
            }
            Some(close) => rest = &after[close..],
            None => break,
        }
    }
    clauses
}
