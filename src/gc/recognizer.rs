use crate::gc::decorator::split_prefix;
use crate::gc::event_type::EventType;
use crate::gc::memory::MEMORY;
use once_cell::sync::Lazy;
use regex::Regex;

/// Expands the shorthand tokens used by the pattern tables into regex syntax.
///
/// `{D}` is a size delta, `{GENS}` zero or more labeled deltas, `{MS}` a millisecond
/// duration, `{SECS}` a legacy seconds duration, `{TRIG}` a parenthesized cause, `{TIMES}`
/// and `{LTIMES}` the unified and legacy CPU clauses, `{DEC}` a legacy inline timestamp.
pub(crate) fn expand(template: &str) -> String {
    template
        .replace("{GENS}", r"(?:[A-Z][A-Za-z ]*: {D} )*")
        .replace("{D}", r"{M}(?:\({M}\))?->{M}\({M}\)")
        .replace("{M}", MEMORY)
        .replace("{ID}", r"GC\(\d+\) ")
        .replace("{SH}", r"^(?:GC\(\d+\) )?\[?")
        .replace("{MS}", r"\d+[.,]\d+ ?ms")
        .replace("{SECS}", r"\d+[.,]\d+ secs")
        .replace("{TRIG}", r"\((?:System\.gc\(\)|[^()]+)\)")
        .replace("{TIMES}", r"User=\d+[.,]\d+s Sys=\d+[.,]\d+s Real=\d+[.,]\d+s")
        .replace(
            "{LTIMES}",
            r"\[Times: user=\d+[.,]\d+ sys=\d+[.,]\d+, real=\d+[.,]\d+ secs\]",
        )
        .replace(
            "{DEC}",
            r"(?:\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[.,]\d{3}[+-]\d{4}: )?\d+[.,]\d{3}: ",
        )
}

// First match wins: specific shapes must precede the general ones they overlap with.
const PATTERN_TABLE: &[(EventType, &str)] = &[
    (EventType::Blank, r"^\s*$"),
    (EventType::VmWarning, r"^(?:OpenJDK|Java HotSpot\(TM\)) .*VM warning: .+$"),
    (
        EventType::HeaderVersion,
        r"^(?:Version: \S.*|(?:OpenJDK|Java HotSpot\(TM\)) .*VM \(.+\) for .+)$",
    ),
    (
        EventType::HeaderMemory,
        r"^Memory: \d+k page, physical \d+k\(\d+k free\).*$",
    ),
    (EventType::HeaderCommandLineFlags, r"^CommandLine flags: .+$"),
    (EventType::UsingSerial, r"^Using Serial$"),
    (EventType::UsingParallel, r"^Using Parallel$"),
    (EventType::UsingCms, r"^Using Concurrent Mark Sweep$"),
    (EventType::UsingG1, r"^Using G1$"),
    (EventType::UsingShenandoah, r"^Using Shenandoah$"),
    (EventType::UsingZ, r"^Using The Z Garbage Collector$"),
    (EventType::InfoCpus, r"^CPUs: \d+ total, \d+ available$"),
    (EventType::InfoMemory, r"^Memory: \d+[KMG]$"),
    (EventType::InfoHeapRegionSize, r"^Heap [Rr]egion [Ss]ize: \d+[KMG]$"),
    (
        EventType::InfoHeapCapacity,
        r"^(?:Heap )?(?:Min|Initial|Max|Soft Max) Capacity: \d+[KMG]$",
    ),
    (
        EventType::InfoHeapAddress,
        r"^Heap address: 0x[0-9a-f]+, size: \d+ MB, Compressed Oops mode: .+$",
    ),
    (EventType::InfoCompressedOops, r"^Compressed Oops: .+$"),
    (
        EventType::InfoWorkers,
        r"^(?:(?:Parallel|Concurrent|Concurrent Refinement|Runtime|GC) )?Workers: .+$",
    ),
    (EventType::InfoLargePages, r"^Large Page Support: .+$"),
    (EventType::InfoNuma, r"^NUMA Support: .+$"),
    (EventType::InfoPreTouch, r"^Pre-touch: .+$"),
    (EventType::InfoPeriodicGc, r"^Periodic GC: .+$"),
    (
        EventType::ShenandoahInfo,
        r"^(?:Shenandoah heuristics: .+|Heuristics ergonomically sets .+|Regions: \d+ x \d+[KMG]|Humongous object threshold: \d+[KMG]|Max TLAB size: \d+[KMG]|Initialize Shenandoah heap: .+|Safepointing mechanism: .+|Mode: .+|Reference Processing: .+|Soft Max Heap Size: .+)$",
    ),
    (EventType::ShenandoahTrigger, r"^Trigger: .+$"),
    (EventType::ShenandoahCancelling, r"^(?:GC\(\d+\) )?Cancelling GC: .+$"),
    (EventType::ShenandoahFreeSet, r"^(?:GC\(\d+\) )?Free: \d+[KMG], Max: .+$"),
    (
        EventType::ZInfo,
        r"^(?:Initializing The Z Garbage Collector|Medium Page Size: .+|Address Space Type: .+|Address Space Size: .+|Heap Backing File: .+|Heap Backing Filesystem: .+|Uncommit: .+|Uncommit Delay: .+|GC Workers Max: .+|Probing address space for the highest valid bit: \d+)$",
    ),
    (
        EventType::UnifiedSafepoint,
        r#"^Safepoint "[^"]+", Time since last: \d+ ns, Reaching safepoint: \d+ ns,(?: Cleanup: \d+ ns,)? At safepoint: \d+ ns, Total: \d+ ns$"#,
    ),
    (
        EventType::ApplicationStopped,
        r"^Total time for which application threads were stopped: \d+[.,]\d+ seconds(?:, Stopping threads took: \d+[.,]\d+ seconds)?$",
    ),
    (
        EventType::ApplicationConcurrentTime,
        r"^Application time: \d+[.,]\d+ seconds$",
    ),
    // Unified pauses. Detailed records arrive merged by the preprocessor.
    (
        EventType::UnifiedSerialNew,
        r"^{ID}Pause Young {TRIG} DefNew: {D} {GENS}Tenured: {D} {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedParNew,
        r"^{ID}Pause Young {TRIG} ParNew: {D} {GENS}CMS: {D} {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedParallelScavenge,
        r"^{ID}Pause Young {TRIG} PSYoungGen: {D} {GENS}(?:ParOldGen|PSOldGen): {D} {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedSerialOld,
        r"^{ID}Pause Full {TRIG} DefNew: {D} {GENS}Tenured: {D} {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedParallelSerialOld,
        r"^{ID}Pause Full {TRIG} PSYoungGen: {D} {GENS}PSOldGen: {D} {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedParallelCompactingOld,
        r"^{ID}Pause Full {TRIG} PSYoungGen: {D} {GENS}ParOldGen: {D} {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedCmsFull,
        r"^{ID}Pause Full {TRIG} (?:ParNew: {D} {GENS})?CMS: {D} {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedCmsInitialMark,
        r"^{ID}Pause Initial Mark {D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedG1ConcurrentStart,
        r"^{ID}Pause (?:Young \((?:Concurrent Start|Initial Mark)\) {TRIG}|Initial Mark {TRIG})(?: \([^()]+\))* {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedG1Mixed,
        r"^{ID}Pause (?:Young \(Mixed\)|Mixed) {TRIG}(?: \([^()]+\))* {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedG1Young,
        r"^{ID}Pause Young (?:\((?:Normal|Prepare Mixed)\) {TRIG}|\(G1 [^()]+\))(?: \([^()]+\))* {GENS}{D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedRemark,
        r"^{ID}Pause Remark {D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedCleanup,
        r"^{ID}Pause Cleanup {D} {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedYoung,
        r"^{ID}Pause Young(?: {TRIG})+ {GENS}{D},? {MS}(?: {TIMES})?$",
    ),
    (
        EventType::UnifiedFull,
        r"^{ID}Pause Full(?: {TRIG})* {GENS}{D},? {MS}(?: {TIMES})?$",
    ),
    // Shenandoah, unified or JDK 8 bracketed.
    (
        EventType::ShenandoahInitMark,
        r"{SH}Pause Init Mark(?: \([^()]+\))*,? {MS}\]?$",
    ),
    (
        EventType::ShenandoahFinalMark,
        r"{SH}Pause Final Mark(?: \([^()]+\))*(?: {D})?,? {MS}\]?$",
    ),
    (
        EventType::ShenandoahInitUpdateRefs,
        r"{SH}Pause Init Update Refs(?: {D})?,? {MS}\]?$",
    ),
    (
        EventType::ShenandoahFinalUpdateRefs,
        r"{SH}Pause Final Update Refs(?: {D})?,? {MS}\]?$",
    ),
    (EventType::ShenandoahFinalRoots, r"{SH}Pause Final Roots,? {MS}\]?$"),
    (EventType::ShenandoahFinalEvac, r"{SH}Pause Final Evac,? {MS}\]?$"),
    (
        EventType::ShenandoahDegeneratedGc,
        r"{SH}Pause Degenerated GC \([^()]+\) {D},? {MS}\]?$",
    ),
    (
        EventType::ShenandoahConcurrent,
        r"{SH}Concurrent [a-z][a-z ]*(?: \([^()]+\))*(?: {D})?,? {MS}\]?$",
    ),
    // Z
    (
        EventType::ZPauseMarkStart,
        r"^{ID}(?:[YO]: )?Pause Mark Start(?: \([^()]+\))? {MS}$",
    ),
    (EventType::ZPauseMarkEnd, r"^{ID}(?:[YO]: )?Pause Mark End {MS}$"),
    (
        EventType::ZPauseRelocateStart,
        r"^{ID}(?:[YO]: )?Pause Relocate Start {MS}$",
    ),
    (
        EventType::ZGarbageCollection,
        r"^{ID}(?:(?:Major|Minor) |Garbage )Collection {TRIG}(?: \([^()]+\))? {M}\(\d+%\)->{M}\(\d+%\)(?: \d+[.,]\d+s)?$",
    ),
    (
        EventType::ZAllocationStall,
        r"^(?:{ID})?(?:[YO]: )?Allocation Stall \(.+\) {MS}$",
    ),
    (
        EventType::ZRelocationStall,
        r"^(?:{ID})?(?:[YO]: )?Relocation Stall \(.+\) {MS}$",
    ),
    (
        EventType::UnifiedConcurrent,
        r"^{ID}(?:[YO]: )?Concurrent [A-Z][A-Za-z\- ]*?(?: \(\d+[.,]\d+s(?:, \d+[.,]\d+s)?\))?(?: {D})? {MS}$",
    ),
    // JDK 8 and earlier.
    (
        EventType::ParNewPromotionFailed,
        r"^\[GC(?: {TRIG})? (?:{DEC})?\[ParNew \(promotion failed\): {D}, {SECS}\] ?(?:{DEC})?\[CMS(?: \(concurrent mode failure\))?: {D}, {SECS}\] {D}, \[(?:Metaspace|CMS Perm ): {D}\], {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::CmsConcurrentModeFailure,
        r"^\[(?:GC|Full GC)(?: {TRIG})? (?:{DEC})?(?:\[ParNew: {D}, {SECS}\] ?(?:{DEC})?)?\[CMS(?:{DEC}\[CMS-concurrent-[a-z\-]+: \d+[.,]\d+/\d+[.,]\d+ secs\](?: {LTIMES})?)? ?\(concurrent mode failure\): {D}, {SECS}\] {D}, \[(?:Metaspace|CMS Perm ): {D}\], {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::SerialNew,
        r"^\[GC(?: {TRIG})? (?:{DEC})?\[DefNew: {D}, {SECS}\] {D}, {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::ParNew,
        r"^\[GC(?: {TRIG})? (?:{DEC})?\[ParNew: {D}, {SECS}\] {D}, {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::ParallelScavenge,
        r"^\[GC(?: {TRIG})? \[PSYoungGen: {D}\] {D}, {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::ParallelCompactingOld,
        r"^\[Full GC(?: {TRIG})? \[PSYoungGen: {D}\] \[ParOldGen: {D}\] {D}, \[(?:Metaspace|PSPermGen): {D}\], {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::ParallelSerialOld,
        r"^\[Full GC(?: {TRIG})? \[PSYoungGen: {D}\] \[PSOldGen: {D}\] {D}, \[(?:Metaspace|PSPermGen): {D}\], {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::SerialOld,
        r"^\[Full GC(?: {TRIG})? (?:{DEC})?\[Tenured: {D}, {SECS}\] {D}, \[(?:Metaspace|Perm): {D}\], {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::CmsSerialOld,
        r"^\[Full GC(?: {TRIG})? (?:{DEC})?\[CMS: {D}, {SECS}\] {D}, \[(?:Metaspace|CMS Perm ): {D}\], {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::CmsInitialMark,
        r"^\[GC \(CMS Initial Mark\) \[1 CMS-initial-mark: {M}\({M}\)\] {M}\({M}\), {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::CmsRemark,
        r"^\[GC \(CMS Final Remark\) .+, {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::CmsConcurrent,
        r"^(?:\[CMS-concurrent-[a-z\-]+?(?:-start\]|: \d+[.,]\d+/\d+[.,]\d+ secs\])(?: {LTIMES})?| CMS: abort preclean due to time .*)$",
    ),
    (
        EventType::G1YoungInitialMark,
        r"^\[GC pause (?:{TRIG} )?\(young\) \(initial-mark\)(?: {D})?, {SECS}\](?: \[Eden: .+\])?(?: {LTIMES})?$",
    ),
    (
        EventType::G1Mixed,
        r"^\[GC pause (?:{TRIG} )?\(mixed\)(?: \(initial-mark\))?(?: {D})?, {SECS}\](?: \[Eden: .+\])?(?: {LTIMES})?$",
    ),
    (
        EventType::G1Young,
        r"^\[GC pause (?:{TRIG} )?\(young\)(?: \(to-space (?:exhausted|overflow)\))?(?: {D})?, {SECS}\](?: \[Eden: .+\])?(?: {LTIMES})?$",
    ),
    (
        EventType::G1Remark,
        r"^\[GC remark(?: .+)?, {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::G1Cleanup,
        r"^\[GC cleanup(?: {D})?, {SECS}\](?: {LTIMES})?$",
    ),
    (
        EventType::G1FullGc,
        r"^\[Full GC {TRIG}\s+{D}(?:, \[Metaspace: {D}\])?, {SECS}\](?: \[Eden: .+\])?(?: {LTIMES})?$",
    ),
    (
        EventType::G1Concurrent,
        r"^\[GC concurrent-[a-z\-]+?(?:, {SECS})?\]$",
    ),
    (
        EventType::FooterHeap,
        r"^Heap(?: (?:def new generation|par new generation|PSYoungGen|garbage-first heap|concurrent mark-sweep generation|Shenandoah Heap|ZHeap|Z Heap)\b.*)?$",
    ),
];

static PATTERNS: Lazy<Vec<(EventType, Regex)>> = Lazy::new(|| {
    PATTERN_TABLE
        .iter()
        .map(|(event_type, template)| (*event_type, Regex::new(&expand(template)).unwrap()))
        .collect()
});

/// Classifies a logical line body. Every input maps to exactly one type.
pub fn classify(body: &str) -> EventType {
    let body = body.trim_end();
    PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(body))
        .map(|(event_type, _)| *event_type)
        .unwrap_or(EventType::Unknown)
}

/// Classifies a raw physical line, decorator included.
pub fn classify_line(line: &str) -> EventType {
    let prefix = split_prefix(line);
    classify(&line[prefix.body_start..])
}

/// The pattern table in evaluation order.
pub fn patterns() -> impl Iterator<Item = (EventType, &'static Regex)> {
    PATTERNS.iter().map(|(event_type, pattern)| (*event_type, pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    fn assert_classified(cases: &[(&str, EventType)]) {
        for (line, expected) in cases {
            assert_eq!(classify_line(line), *expected, "line: {line}");
        }
    }

    #[test]
    fn test_every_type_has_a_pattern() {
        let covered: HashSet<EventType> = patterns().map(|(event_type, _)| event_type).collect();
        for event_type in EventType::iter().filter(|t| *t != EventType::Unknown) {
            assert!(covered.contains(&event_type), "{event_type} has no pattern");
        }
    }

    #[test]
    fn test_banners_and_info() {
        assert_classified(&[
            ("[0.004s][info][gc] Using G1", EventType::UsingG1),
            ("[0.004s][info][gc] Using Serial", EventType::UsingSerial),
            ("[0.004s][info][gc] Using Parallel", EventType::UsingParallel),
            ("[0.004s][info][gc] Using Concurrent Mark Sweep", EventType::UsingCms),
            ("[0.004s][info][gc] Using Shenandoah", EventType::UsingShenandoah),
            ("[0.004s][info][gc,init] Using The Z Garbage Collector", EventType::UsingZ),
            ("[0.004s][info][gc,init] Version: 17.0.1+12-LTS (release)", EventType::HeaderVersion),
            ("[0.004s][info][gc,init] CPUs: 8 total, 8 available", EventType::InfoCpus),
            ("[0.004s][info][gc,init] Memory: 15884M", EventType::InfoMemory),
            ("[0.004s][info][gc,init] Heap Region Size: 1M", EventType::InfoHeapRegionSize),
            ("[0.004s][info][gc,init] Heap Max Capacity: 4G", EventType::InfoHeapCapacity),
            ("[0.004s][info][gc,init] Parallel Workers: 8", EventType::InfoWorkers),
            ("[0.004s][info][gc,init] Large Page Support: Disabled", EventType::InfoLargePages),
            ("[0.004s][info][gc,init] Periodic GC: Disabled", EventType::InfoPeriodicGc),
            ("[0.004s][info][gc,init] Compressed Oops: Enabled (32-bit)", EventType::InfoCompressedOops),
            ("[0.004s][info][gc] Regions: 256 x 1024K", EventType::ShenandoahInfo),
            ("[0.004s][info][gc,init] Medium Page Size: 32M", EventType::ZInfo),
            ("CommandLine flags: -XX:+UseG1GC -XX:+PrintGCDetails", EventType::HeaderCommandLineFlags),
            ("Memory: 4k page, physical 16318276k(8718432k free), swap 0k(0k free)", EventType::HeaderMemory),
            ("OpenJDK 64-Bit Server VM (25.242-b08) for linux-amd64 JRE (1.8.0_242-b08), built on Jan 28 2020", EventType::HeaderVersion),
            ("OpenJDK 64-Bit Server VM warning: Ignoring option MaxPermSize", EventType::VmWarning),
        ]);
    }

    #[test]
    fn test_unified_pauses() {
        assert_classified(&[
            ("[0.178s][info][gc] GC(5) Pause Initial Mark 1M->1M(2M) 0.157ms", EventType::UnifiedCmsInitialMark),
            ("[10.478s][info][gc] GC(0) Pause Full 1589M->1002M(1690M), 4077.274 ms", EventType::UnifiedFull),
            ("[0.053s][info][gc] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.202ms", EventType::UnifiedYoung),
            ("[0.053s][info][gc] GC(2) Pause Full (Ergonomics) 10M->4M(20M) 12.001ms", EventType::UnifiedFull),
            ("[0.3s][info][gc] GC(3) Pause Young (Normal) (G1 Evacuation Pause) 25M->4M(256M) 3.456ms", EventType::UnifiedG1Young),
            ("[0.3s][info][gc] GC(3) Pause Young (G1 Evacuation Pause) 25M->4M(256M) 3.456ms", EventType::UnifiedG1Young),
            ("[0.3s][info][gc] GC(4) Pause Young (Concurrent Start) (G1 Humongous Allocation) 40M->30M(256M) 2.1ms", EventType::UnifiedG1ConcurrentStart),
            ("[0.3s][info][gc] GC(4) Pause Initial Mark (G1 Humongous Allocation) 40M->30M(256M) 2.1ms", EventType::UnifiedG1ConcurrentStart),
            ("[0.3s][info][gc] GC(9) Pause Young (Mixed) (G1 Evacuation Pause) 40M->20M(256M) 5.0ms", EventType::UnifiedG1Mixed),
            ("[0.4s][info][gc] GC(4) Pause Remark 30M->30M(256M) 1.1ms", EventType::UnifiedRemark),
            ("[0.4s][info][gc] GC(4) Pause Cleanup 30M->30M(256M) 0.1ms", EventType::UnifiedCleanup),
            ("[0.4s][info][gc] GC(7) Pause Full (System.gc()) 30M->8M(256M) 25.3ms", EventType::UnifiedFull),
        ]);
    }

    #[test]
    fn test_merged_generation_records() {
        assert_classified(&[
            ("GC(0) Pause Young (Allocation Failure) ParNew: 974K->128K(1152K) CMS: 0K->518K(960K) Metaspace: 250K->250K(1056768K) 0M->0M(1M) 1.202ms User=0.01s Sys=0.00s Real=0.00s", EventType::UnifiedParNew),
            ("GC(0) Pause Young (Allocation Failure) DefNew: 983K->128K(1152K) Tenured: 0K->458K(768K) Metaspace: 246K->246K(1056768K) 0M->0M(1M) 1.393ms User=0.00s Sys=0.00s Real=0.00s", EventType::UnifiedSerialNew),
            ("GC(1) Pause Young (Allocation Failure) PSYoungGen: 512K->432K(1024K) ParOldGen: 0K->8K(512K) Metaspace: 120K->120K(1056768K) 0M->0M(1M) 0.762ms", EventType::UnifiedParallelScavenge),
            ("GC(2) Pause Full (Ergonomics) PSYoungGen: 502K->436K(1536K) ParOldGen: 460K->511K(2048K) Metaspace: 701K->701K(1056768K) 0M->0M(3M) 1.849ms User=0.01s Sys=0.00s Real=0.00s", EventType::UnifiedParallelCompactingOld),
            ("GC(0) Pause Young (Allocation Failure) DefNew: 4416K(4928K)->512K(4928K) Eden: 4416K(4416K)->0K(4416K) From: 0K(512K)->512K(512K) Tenured: 0K(10944K)->1710K(10944K) Metaspace: 1125K(1216K)->1125K(1216K) NonClass: 1015K(1088K)->1015K(1088K) Class: 110K(128K)->110K(128K) 4M->2M(15M) 5.099ms User=0.00s Sys=0.00s Real=0.01s", EventType::UnifiedSerialNew),
            ("GC(1) Pause Full (Ergonomics) PSYoungGen: 496K(3584K)->0K(3584K) Eden: 0K(3072K)->0K(3072K) From: 496K(512K)->0K(512K) ParOldGen: 8K(8192K)->400K(8192K) 4M->2M(15M) 9.000ms User=0.00s Sys=0.00s Real=0.01s", EventType::UnifiedParallelCompactingOld),
            ("GC(3) Pause Full (Allocation Failure) DefNew: 1K->0K(2K) Tenured: 10K->8K(20K) Metaspace: 1K->1K(2K) 0M->0M(1M) 2.0ms", EventType::UnifiedSerialOld),
            ("GC(4) Pause Young (Normal) (G1 Evacuation Pause) Metaspace: 1125K(1216K)->1125K(1216K) NonClass: 1015K(1088K)->1015K(1088K) Class: 110K(128K)->110K(128K) 25M->4M(256M) 3.456ms User=0.01s Sys=0.00s Real=0.00s", EventType::UnifiedG1Young),
        ]);
    }

    #[test]
    fn test_shenandoah() {
        assert_classified(&[
            ("[0.4s][info][gc] GC(3) Pause Init Mark (unload classes) 0.063ms", EventType::ShenandoahInitMark),
            ("[0.4s][info][gc] GC(3) Pause Init Mark 0.063ms", EventType::ShenandoahInitMark),
            ("[0.4s][info][gc] GC(3) Concurrent marking (unload classes) 74M->74M(128M) 0.866ms", EventType::ShenandoahConcurrent),
            ("[0.4s][info][gc] GC(3) Pause Final Mark (unload classes) 0.149ms", EventType::ShenandoahFinalMark),
            ("[0.4s][info][gc] GC(3) Concurrent cleanup 74M->62M(128M) 0.055ms", EventType::ShenandoahConcurrent),
            ("[0.4s][info][gc] GC(3) Pause Init Update Refs 0.008ms", EventType::ShenandoahInitUpdateRefs),
            ("[0.4s][info][gc] GC(3) Pause Final Update Refs 0.026ms", EventType::ShenandoahFinalUpdateRefs),
            ("[0.4s][info][gc] GC(3) Pause Degenerated GC (Mark) 93M->55M(128M) 7.562ms", EventType::ShenandoahDegeneratedGc),
            ("[0.4s][info][gc] Concurrent uncommit 874M->874M(1008M) 5.101ms", EventType::ShenandoahConcurrent),
            ("[0.4s][info][gc] Trigger: Learning 1 of 5. Free (89M) is below initial threshold (89M)", EventType::ShenandoahTrigger),
            ("[0.4s][info][gc] GC(1) Cancelling GC: Allocation Failure", EventType::ShenandoahCancelling),
            ("2020-03-10T08:03:29.365-0400: 0.123: [Pause Init Mark, 0.178 ms]", EventType::ShenandoahInitMark),
            ("2020-03-10T08:03:29.365-0400: 0.123: [Concurrent marking 74M->74M(128M), 0.866 ms]", EventType::ShenandoahConcurrent),
        ]);
    }

    #[test]
    fn test_z() {
        assert_classified(&[
            ("[0.5s][info][gc] GC(2) Garbage Collection (Warmup) 68M(7%)->70M(7%)", EventType::ZGarbageCollection),
            ("[0.5s][info][gc] GC(0) Major Collection (Warmup) 30M(1%)->12M(0%) 0.049s", EventType::ZGarbageCollection),
            ("[0.5s][info][gc,phases] GC(2) Pause Mark Start 0.008ms", EventType::ZPauseMarkStart),
            ("[0.5s][info][gc,phases] GC(0) Y: Pause Mark Start (Major) 0.010ms", EventType::ZPauseMarkStart),
            ("[0.5s][info][gc,phases] GC(2) Pause Mark End 0.012ms", EventType::ZPauseMarkEnd),
            ("[0.5s][info][gc,phases] GC(2) Pause Relocate Start 0.006ms", EventType::ZPauseRelocateStart),
            ("[0.5s][info][gc,phases] GC(2) Concurrent Mark 2.345ms", EventType::UnifiedConcurrent),
            ("[0.5s][info][gc,phases] GC(2) Concurrent Process Non-Strong References 0.512ms", EventType::UnifiedConcurrent),
            ("[0.5s][info][gc] Allocation Stall (main) 12.345ms", EventType::ZAllocationStall),
            ("[0.5s][info][gc] GC(3) Y: Allocation Stall (pool-1-thread-2) 0.204ms", EventType::ZAllocationStall),
            ("[0.5s][info][gc] Relocation Stall (main) 0.512ms", EventType::ZRelocationStall),
        ]);
    }

    #[test]
    fn test_concurrent_and_safepoints() {
        assert_classified(&[
            ("[1.2s][info][gc,marking] GC(1) Concurrent Mark (0.084s, 0.090s) 5.714ms", EventType::UnifiedConcurrent),
            ("[1.2s][info][gc] GC(1) Concurrent Cycle 12.3ms", EventType::UnifiedConcurrent),
            ("[1.2s][info][safepoint] Safepoint \"G1CollectForAllocation\", Time since last: 1234 ns, Reaching safepoint: 567 ns, At safepoint: 8901 ns, Total: 9468 ns", EventType::UnifiedSafepoint),
            ("[1.2s][info][safepoint] Safepoint \"Cleanup\", Time since last: 1000 ns, Reaching safepoint: 100 ns, Cleanup: 10 ns, At safepoint: 200 ns, Total: 310 ns", EventType::UnifiedSafepoint),
            ("2.500: Total time for which application threads were stopped: 0.0001234 seconds, Stopping threads took: 0.0000234 seconds", EventType::ApplicationStopped),
            ("2.500: Application time: 0.1234567 seconds", EventType::ApplicationConcurrentTime),
        ]);
    }

    #[test]
    fn test_legacy_events() {
        assert_classified(&[
            ("2.123: [GC (Allocation Failure) 2.123: [DefNew: 974K->128K(1152K), 0.0040000 secs] 974K->700K(2112K), 0.0041000 secs] [Times: user=0.01 sys=0.00, real=0.00 secs]", EventType::SerialNew),
            ("2.123: [GC (Allocation Failure) 2.123: [ParNew: 974K->128K(1152K), 0.0040000 secs] 974K->700K(2112K), 0.0041000 secs] [Times: user=0.01 sys=0.00, real=0.00 secs]", EventType::ParNew),
            ("2.123: [GC (Allocation Failure) [PSYoungGen: 1024K->512K(1536K)] 1024K->600K(5120K), 0.0012000 secs] [Times: user=0.00 sys=0.00, real=0.00 secs]", EventType::ParallelScavenge),
            ("3.500: [Full GC (Ergonomics) [PSYoungGen: 512K->0K(1536K)] [ParOldGen: 3000K->2000K(3584K)] 3512K->2000K(5120K), [Metaspace: 2700K->2700K(1056768K)], 0.0200000 secs] [Times: user=0.05 sys=0.00, real=0.02 secs]", EventType::ParallelCompactingOld),
            ("3.500: [Full GC (System.gc()) [PSYoungGen: 512K->0K(1536K)] [PSOldGen: 3000K->2000K(3584K)] 3512K->2000K(5120K), [PSPermGen: 2700K->2700K(21248K)], 0.0200000 secs]", EventType::ParallelSerialOld),
            ("3.500: [Full GC (Allocation Failure) 3.500: [Tenured: 3000K->2000K(3584K), 0.0190000 secs] 3512K->2000K(5120K), [Metaspace: 2700K->2700K(1056768K)], 0.0200000 secs] [Times: user=0.02 sys=0.00, real=0.02 secs]", EventType::SerialOld),
            ("3.500: [Full GC (Allocation Failure) 3.500: [CMS: 3000K->2000K(3584K), 0.0190000 secs] 3512K->2000K(5120K), [Metaspace: 2700K->2700K(1056768K)], 0.0200000 secs] [Times: user=0.02 sys=0.00, real=0.02 secs]", EventType::CmsSerialOld),
            ("2.123: [GC (Allocation Failure) 2.123: [ParNew (promotion failed): 118016K->118016K(118016K), 0.0512340 secs]2.174: [CMS: 262143K->262143K(262144K), 0.1512340 secs] 380159K->300000K(380160K), [Metaspace: 2700K->2700K(1056768K)], 0.2024680 secs] [Times: user=0.25 sys=0.00, real=0.20 secs]", EventType::ParNewPromotionFailed),
            ("6.000: [Full GC (Allocation Failure) 6.000: [CMS6.100: [CMS-concurrent-mark: 0.100/0.100 secs] [Times: user=0.20 sys=0.00, real=0.10 secs] (concurrent mode failure): 262143K->200000K(262144K), 0.9000000 secs] 380159K->200000K(380160K), [Metaspace: 2700K->2700K(1056768K)], 0.9000000 secs] [Times: user=0.90 sys=0.00, real=0.90 secs]", EventType::CmsConcurrentModeFailure),
            ("6.000: [GC (Allocation Failure) 6.000: [ParNew: 118016K->118016K(118016K), 0.0000200 secs]6.000: [CMS (concurrent mode failure): 262143K->200000K(262144K), 0.9000000 secs] 380159K->200000K(380160K), [Metaspace: 2700K->2700K(1056768K)], 0.9000000 secs]", EventType::CmsConcurrentModeFailure),
            ("4.000: [GC (CMS Initial Mark) [1 CMS-initial-mark: 2000K(3584K)] 2500K(5120K), 0.0010000 secs] [Times: user=0.00 sys=0.00, real=0.00 secs]", EventType::CmsInitialMark),
            ("4.000: [GC (CMS Final Remark) [YG occupancy: 100 K (1152 K)]4.1: [Rescan (parallel) , 0.0010000 secs]4.1: [weak refs processing, 0.0000100 secs] [1 CMS-remark: 2000K(3584K)] 2100K(5120K), 0.0020000 secs] [Times: user=0.00 sys=0.00, real=0.00 secs]", EventType::CmsRemark),
            ("4.000: [CMS-concurrent-mark-start]", EventType::CmsConcurrent),
            ("4.100: [CMS-concurrent-mark: 0.010/0.020 secs] [Times: user=0.02 sys=0.00, real=0.02 secs]", EventType::CmsConcurrent),
            ("4.100: [CMS-concurrent-abortable-preclean: 0.010/0.020 secs]", EventType::CmsConcurrent),
            ("2.100: [GC pause (G1 Evacuation Pause) (young) 24M->4632K(256M), 0.0041000 secs]", EventType::G1Young),
            ("2.100: [GC pause (G1 Evacuation Pause) (young), 0.0041000 secs] [Eden: 24.0M(24.0M)->0.0B(13.0M) Survivors: 0.0B->3072.0K Heap: 24.0M(256.0M)->4632.0K(256.0M)] [Times: user=0.01 sys=0.00, real=0.00 secs]", EventType::G1Young),
            ("2.100: [GC pause (G1 Humongous Allocation) (young) (initial-mark) 24M->4632K(256M), 0.0041000 secs]", EventType::G1YoungInitialMark),
            ("2.100: [GC pause (G1 Evacuation Pause) (mixed) 24M->4632K(256M), 0.0041000 secs]", EventType::G1Mixed),
            ("2.200: [GC remark 2.2: [Finalize Marking, 0.0001 secs] 2.2: [GC ref-proc, 0.0001 secs], 0.0020000 secs]", EventType::G1Remark),
            ("2.300: [GC cleanup 10M->9M(256M), 0.0005000 secs]", EventType::G1Cleanup),
            ("2.500: [Full GC (Allocation Failure)  1023M->723M(1024M), 3.1234000 secs]", EventType::G1FullGc),
            ("2.200: [GC concurrent-root-region-scan-start]", EventType::G1Concurrent),
            ("2.200: [GC concurrent-mark-end, 0.0123000 secs]", EventType::G1Concurrent),
        ]);
    }

    #[test]
    fn test_structural_and_unknown() {
        assert_classified(&[
            ("[1.0s][info][gc]", EventType::Blank),
            ("", EventType::Blank),
            ("Heap", EventType::FooterHeap),
            ("Heap def new generation   total 1152K, used 400K the space 960K", EventType::FooterHeap),
            ("[0.004s][info][gc] Using Epsilon", EventType::Unknown),
            ("this is not a gc log line", EventType::Unknown),
        ]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let line = "GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.202ms";
        assert_eq!(classify(line), classify(line));
        assert_eq!(classify("GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.202ms   "), EventType::UnifiedYoung);
    }
}
