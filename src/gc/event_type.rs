use serde::Serialize;
use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display)]
pub enum Collector {
    Serial,
    Parallel,
    #[strum(serialize = "CMS")]
    Cms,
    G1,
    Shenandoah,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventFamily {
    /// Blank lines and heap-at-exit footers.
    Structural,
    Header,
    /// Collector-selection banners.
    Using,
    /// Untimed diagnostic banners.
    Info,
    Concurrent,
    Pause,
    Safepoint,
    /// Individual application threads waiting on the collector.
    Stall,
    VmWarning,
    Unknown,
}

/// Every kind of line the recognizer can tell apart.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
pub enum EventType {
    Blank,
    FooterHeap,
    VmWarning,

    HeaderVersion,
    HeaderMemory,
    HeaderCommandLineFlags,

    UsingSerial,
    UsingParallel,
    UsingCms,
    UsingG1,
    UsingShenandoah,
    UsingZ,

    InfoCpus,
    InfoMemory,
    InfoHeapRegionSize,
    InfoHeapCapacity,
    InfoHeapAddress,
    InfoCompressedOops,
    InfoWorkers,
    InfoLargePages,
    InfoNuma,
    InfoPreTouch,
    InfoPeriodicGc,
    ShenandoahInfo,
    ShenandoahTrigger,
    ShenandoahCancelling,
    ShenandoahFreeSet,
    ZInfo,

    UnifiedSafepoint,
    ApplicationStopped,
    ApplicationConcurrentTime,

    UnifiedSerialNew,
    UnifiedParNew,
    UnifiedParallelScavenge,
    UnifiedSerialOld,
    UnifiedParallelSerialOld,
    UnifiedParallelCompactingOld,
    UnifiedCmsFull,
    UnifiedCmsInitialMark,
    UnifiedG1Young,
    UnifiedG1ConcurrentStart,
    UnifiedG1Mixed,
    UnifiedRemark,
    UnifiedCleanup,
    UnifiedYoung,
    UnifiedFull,
    UnifiedConcurrent,

    ShenandoahInitMark,
    ShenandoahFinalMark,
    ShenandoahInitUpdateRefs,
    ShenandoahFinalUpdateRefs,
    ShenandoahFinalRoots,
    ShenandoahFinalEvac,
    ShenandoahDegeneratedGc,
    ShenandoahConcurrent,

    ZPauseMarkStart,
    ZPauseMarkEnd,
    ZPauseRelocateStart,
    ZGarbageCollection,
    ZAllocationStall,
    ZRelocationStall,

    SerialNew,
    SerialOld,
    ParNew,
    ParNewPromotionFailed,
    CmsConcurrentModeFailure,
    ParallelScavenge,
    ParallelSerialOld,
    ParallelCompactingOld,
    CmsSerialOld,
    CmsInitialMark,
    CmsRemark,
    CmsConcurrent,
    G1Young,
    G1YoungInitialMark,
    G1Mixed,
    G1Remark,
    G1Cleanup,
    G1FullGc,
    G1Concurrent,

    Unknown,
}

impl EventType {
    pub fn family(self) -> EventFamily {
        use EventType::*;
        match self {
            Blank | FooterHeap => EventFamily::Structural,
            VmWarning => EventFamily::VmWarning,
            HeaderVersion | HeaderMemory | HeaderCommandLineFlags => EventFamily::Header,
            UsingSerial | UsingParallel | UsingCms | UsingG1 | UsingShenandoah | UsingZ => {
                EventFamily::Using
            }
            InfoCpus | InfoMemory | InfoHeapRegionSize | InfoHeapCapacity | InfoHeapAddress
            | InfoCompressedOops | InfoWorkers | InfoLargePages | InfoNuma | InfoPreTouch
            | InfoPeriodicGc | ShenandoahInfo | ShenandoahTrigger | ShenandoahCancelling
            | ShenandoahFreeSet | ZInfo => EventFamily::Info,
            UnifiedSafepoint | ApplicationStopped => EventFamily::Safepoint,
            ApplicationConcurrentTime | UnifiedConcurrent | ShenandoahConcurrent
            | ZGarbageCollection | CmsConcurrent | G1Concurrent => EventFamily::Concurrent,
            ZAllocationStall | ZRelocationStall => EventFamily::Stall,
            UnifiedSerialNew | UnifiedParNew | UnifiedParallelScavenge | UnifiedSerialOld
            | UnifiedParallelSerialOld | UnifiedParallelCompactingOld | UnifiedCmsFull
            | UnifiedCmsInitialMark | UnifiedG1Young | UnifiedG1ConcurrentStart
            | UnifiedG1Mixed | UnifiedRemark | UnifiedCleanup | UnifiedYoung | UnifiedFull
            | ShenandoahInitMark | ShenandoahFinalMark | ShenandoahInitUpdateRefs
            | ShenandoahFinalUpdateRefs | ShenandoahFinalRoots | ShenandoahFinalEvac
            | ShenandoahDegeneratedGc | ZPauseMarkStart | ZPauseMarkEnd | ZPauseRelocateStart
            | SerialNew | SerialOld | ParNew | ParNewPromotionFailed | CmsConcurrentModeFailure
            | ParallelScavenge | ParallelSerialOld
            | ParallelCompactingOld | CmsSerialOld | CmsInitialMark | CmsRemark | G1Young
            | G1YoungInitialMark | G1Mixed | G1Remark | G1Cleanup | G1FullGc => {
                EventFamily::Pause
            }
            Unknown => EventFamily::Unknown,
        }
    }

    /// Stops all application threads for the event's duration.
    pub fn is_blocking(self) -> bool {
        matches!(self.family(), EventFamily::Pause | EventFamily::Safepoint)
    }

    pub fn is_safepoint(self) -> bool {
        self.family() == EventFamily::Safepoint
    }

    /// Carries a duration when well formed.
    pub fn is_timed(self) -> bool {
        matches!(
            self.family(),
            EventFamily::Pause
                | EventFamily::Safepoint
                | EventFamily::Concurrent
                | EventFamily::Stall
        )
    }

    /// Can state a cause in a parenthesized clause.
    pub fn has_trigger(self) -> bool {
        self.family() == EventFamily::Pause || self == EventType::ZGarbageCollection
    }

    /// A full collection (including the degenerated fallback of concurrent collectors).
    pub fn is_full_collection(self) -> bool {
        use EventType::*;
        matches!(
            self,
            UnifiedSerialOld
                | UnifiedParallelSerialOld
                | UnifiedParallelCompactingOld
                | UnifiedCmsFull
                | UnifiedFull
                | ShenandoahDegeneratedGc
                | SerialOld
                | ParallelSerialOld
                | ParallelCompactingOld
                | CmsSerialOld
                | ParNewPromotionFailed
                | CmsConcurrentModeFailure
                | G1FullGc
        )
    }

    /// The collector family the line identifies, when the line alone is enough to tell.
    pub fn collector(self) -> Option<Collector> {
        use EventType::*;
        match self {
            UsingSerial | UnifiedSerialNew | UnifiedSerialOld | SerialNew | SerialOld => {
                Some(Collector::Serial)
            }
            UsingParallel | UnifiedParallelScavenge | UnifiedParallelSerialOld
            | UnifiedParallelCompactingOld | ParallelScavenge | ParallelSerialOld
            | ParallelCompactingOld => Some(Collector::Parallel),
            UsingCms | UnifiedParNew | UnifiedCmsFull | UnifiedCmsInitialMark | ParNew
            | ParNewPromotionFailed | CmsConcurrentModeFailure | CmsSerialOld | CmsInitialMark
            | CmsRemark | CmsConcurrent => Some(Collector::Cms),
            UsingG1 | InfoHeapRegionSize | UnifiedG1Young | UnifiedG1ConcurrentStart
            | UnifiedG1Mixed | G1Young | G1YoungInitialMark | G1Mixed | G1Remark | G1Cleanup
            | G1FullGc | G1Concurrent => Some(Collector::G1),
            UsingShenandoah | ShenandoahInfo | ShenandoahTrigger | ShenandoahCancelling
            | ShenandoahFreeSet | ShenandoahInitMark | ShenandoahFinalMark
            | ShenandoahInitUpdateRefs | ShenandoahFinalUpdateRefs | ShenandoahFinalRoots
            | ShenandoahFinalEvac | ShenandoahDegeneratedGc | ShenandoahConcurrent => {
                Some(Collector::Shenandoah)
            }
            UsingZ | ZInfo | ZPauseMarkStart | ZPauseMarkEnd | ZPauseRelocateStart
            | ZGarbageCollection | ZAllocationStall | ZRelocationStall => Some(Collector::Z),
            _ => None,
        }
    }
}
