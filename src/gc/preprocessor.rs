use crate::gc::decorator::{split_prefix, LogStyle};
use crate::gc::recognizer::expand;
use crate::gc::types::{LogicalLine, StampPosition};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static GC_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^GC\((\d+)\) (.*)$").unwrap());

// A pause header without sizes or duration: `GC(3) Pause Young (Allocation Failure)`.
// Generation deltas may already sit on the same line.
static UNIFIED_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&expand(
        r"^GC\(\d+\) Pause [A-Z][A-Za-z ]*?(?: {TRIG})*(?: [A-Z][A-Za-z ]*: {D})*$",
    ))
    .unwrap()
});

static GENERATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&expand(
        r"^(?:DefNew|ParNew|Tenured|CMS|PSYoungGen|ParOldGen|PSOldGen|Metaspace): {D}",
    ))
    .unwrap()
});

static SUMMARY_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&expand(
        r"^Pause [A-Z][A-Za-z ]*?(?: {TRIG})*,? (?P<tail>(?:{D},? )?{MS})$",
    ))
    .unwrap()
});

static ENDS_WITH_DURATION: Lazy<Regex> = Lazy::new(|| Regex::new(&expand(r"{MS}$")).unwrap());

static CPU_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(&expand(r"^{TIMES}$")).unwrap());

// Phase start markers carry no data of their own.
static CONCURRENT_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:GC\(\d+\) )?(?:[YO]: )?Concurrent [A-Za-z\- ]+(?: \([^()]+\))*$").unwrap()
});

// Z cycle and generation start markers; the cycle summary follows with sizes.
static Z_COLLECTION_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&expand(
        r"^GC\(\d+\) (?:(?:Major|Minor|Garbage) Collection(?: {TRIG})+|[YO]: (?:Young|Old) Generation)$",
    ))
    .unwrap()
});

// JDK 8 lines printed when the event completes rather than when it starts.
const END_STAMPED_LEGACY: &[&str] = &[
    "Total time for which",
    "Application time:",
    "[GC concurrent-",
    "[CMS-concurrent-",
    "[Pause ",
    "[Concurrent ",
];

static LEGACY_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?:GC pause|GC remark|GC cleanup|Full GC)\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccumulationKind {
    /// Unified pause spread over start, generation, summary and CPU lines sharing a GC id.
    Unified { gc_id: u64, summary_seen: bool },
    /// JDK 8 pause header followed by indented detail lines.
    LegacyDetail,
    /// `Heap` footer followed by indented usage lines.
    HeapFooter,
}

/// A record being assembled from several physical lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulation {
    kind: AccumulationKind,
    record: LogicalLine,
}

impl Accumulation {
    fn append(&mut self, part: &str) {
        let part = part.trim();
        if part.is_empty() {
            return;
        }
        self.record.body.push(' ');
        self.record.body.push_str(part);
        self.record.text.push(' ');
        self.record.text.push_str(part);
    }
}

/// Merge state threaded through the physical lines of one log.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreprocessState {
    #[default]
    Idle,
    Accumulating(Accumulation),
}

impl PreprocessState {
    /// Consumes one physical line, emitting every logical line it completes.
    pub fn step(self, raw: &str, emit: &mut impl FnMut(LogicalLine)) -> PreprocessState {
        let raw = raw.trim_end_matches(['\r', '\n']);
        let line = LogicalLine::from_raw(raw);
        match self {
            PreprocessState::Idle => idle(line, emit),
            PreprocessState::Accumulating(accumulation) => match accumulation.kind {
                AccumulationKind::Unified {
                    gc_id,
                    summary_seen,
                } => unified(accumulation, gc_id, summary_seen, line, emit),
                AccumulationKind::LegacyDetail => legacy_detail(accumulation, raw, line, emit),
                AccumulationKind::HeapFooter => heap_footer(accumulation, line, emit),
            },
        }
    }

    /// Flushes an unterminated record at end of input.
    pub fn finish(self, emit: &mut impl FnMut(LogicalLine)) {
        if let PreprocessState::Accumulating(accumulation) = self {
            if accumulation.kind != AccumulationKind::HeapFooter {
                debug!(record = %accumulation.record.text, "flushing unterminated record at end of input");
            }
            emit(accumulation.record);
        }
    }
}

impl LogicalLine {
    /// Wraps one physical line, resolving its prefix and default stamp position.
    pub fn from_raw(raw: &str) -> LogicalLine {
        let prefix = split_prefix(raw);
        let body = raw[prefix.body_start..].trim_end().to_string();
        let stamp = match prefix.style {
            LogStyle::Unified => StampPosition::End,
            LogStyle::Legacy if END_STAMPED_LEGACY.iter().any(|p| body.starts_with(p)) => {
                StampPosition::End
            }
            _ => StampPosition::Start,
        };
        LogicalLine {
            decorator: prefix.decorator,
            style: prefix.style,
            stamp,
            body,
            text: raw.trim_end().to_string(),
        }
    }
}

fn opens(line: &LogicalLine) -> Option<AccumulationKind> {
    if line.body == "Heap" {
        return Some(AccumulationKind::HeapFooter);
    }
    match line.style {
        LogStyle::Unified if UNIFIED_OPEN.is_match(&line.body) => {
            let gc_id = GC_ID.captures(&line.body)?[1].parse().ok()?;
            Some(AccumulationKind::Unified {
                gc_id,
                summary_seen: false,
            })
        }
        LogStyle::Legacy | LogStyle::Undecorated if LEGACY_OPEN.is_match(&line.body) => {
            Some(AccumulationKind::LegacyDetail)
        }
        _ => None,
    }
}

fn is_noise(line: &LogicalLine) -> bool {
    line.body.trim().is_empty()
        || (line.style == LogStyle::Unified
            && (CONCURRENT_START.is_match(&line.body) || Z_COLLECTION_START.is_match(&line.body)))
}

fn idle(mut line: LogicalLine, emit: &mut impl FnMut(LogicalLine)) -> PreprocessState {
    if is_noise(&line) {
        return PreprocessState::Idle;
    }
    match opens(&line) {
        Some(kind) => {
            line.stamp = StampPosition::Start;
            PreprocessState::Accumulating(Accumulation { kind, record: line })
        }
        None => {
            emit(line);
            PreprocessState::Idle
        }
    }
}

/// Emits the current record and handles `line` from a clean state.
fn close_then(
    accumulation: Accumulation,
    line: LogicalLine,
    emit: &mut impl FnMut(LogicalLine),
) -> PreprocessState {
    emit(accumulation.record);
    idle(line, emit)
}

fn unified(
    mut accumulation: Accumulation,
    gc_id: u64,
    summary_seen: bool,
    line: LogicalLine,
    emit: &mut impl FnMut(LogicalLine),
) -> PreprocessState {
    if line.body.trim().is_empty() {
        return PreprocessState::Accumulating(accumulation);
    }

    let same_id = GC_ID
        .captures(&line.body)
        .filter(|caps| caps[1].parse::<u64>().ok() == Some(gc_id))
        .map(|caps| caps[2].to_string());

    let Some(rest) = same_id else {
        if summary_seen {
            return close_then(accumulation, line, emit);
        }
        if opens(&line).is_some() {
            debug!(record = %accumulation.record.text, "flushing unterminated record before a new one");
            return close_then(accumulation, line, emit);
        }
        // Unrelated lines may interleave with an open record.
        if !is_noise(&line) {
            emit(line);
        }
        return PreprocessState::Accumulating(accumulation);
    };

    if CPU_LINE.is_match(&rest) {
        accumulation.append(&rest);
        emit(accumulation.record);
        return PreprocessState::Idle;
    }
    if summary_seen {
        return close_then(accumulation, line, emit);
    }

    let mut summary_seen = false;
    if let Some(caps) = SUMMARY_TAIL.captures(&rest) {
        accumulation.append(&caps["tail"]);
        summary_seen = true;
    } else if GENERATION_LINE.is_match(&rest) {
        accumulation.append(&rest);
        summary_seen = ENDS_WITH_DURATION.is_match(&rest);
    }
    // Any other same-id line is phase detail and is dropped.
    accumulation.kind = AccumulationKind::Unified {
        gc_id,
        summary_seen,
    };
    PreprocessState::Accumulating(accumulation)
}

fn legacy_detail(
    mut accumulation: Accumulation,
    raw: &str,
    line: LogicalLine,
    emit: &mut impl FnMut(LogicalLine),
) -> PreprocessState {
    if raw.trim().is_empty() {
        return PreprocessState::Accumulating(accumulation);
    }
    let indented = line.style == LogStyle::Undecorated && raw.starts_with([' ', '\t']);
    if !indented {
        return close_then(accumulation, line, emit);
    }
    let detail = raw.trim();
    if detail.starts_with("[Times:") {
        accumulation.append(detail);
        emit(accumulation.record);
        return PreprocessState::Idle;
    }
    if detail.starts_with("[Eden:") {
        accumulation.append(detail);
    }
    PreprocessState::Accumulating(accumulation)
}

fn heap_footer(
    mut accumulation: Accumulation,
    line: LogicalLine,
    emit: &mut impl FnMut(LogicalLine),
) -> PreprocessState {
    if line.body.starts_with([' ', '\t']) && !line.body.trim().is_empty() {
        accumulation.append(&line.body);
        return PreprocessState::Accumulating(accumulation);
    }
    close_then(accumulation, line, emit)
}

/// Owns the merge state for callers that feed lines one at a time.
#[derive(Debug, Default)]
pub struct Preprocessor {
    state: PreprocessState,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, raw: &str, emit: &mut impl FnMut(LogicalLine)) {
        let state = std::mem::take(&mut self.state);
        self.state = state.step(raw, emit);
    }

    pub fn finish(&mut self, emit: &mut impl FnMut(LogicalLine)) {
        std::mem::take(&mut self.state).finish(emit);
    }

    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, PreprocessState::Accumulating(_))
    }
}

/// Runs a whole line sequence through the merge fold.
pub fn preprocess<I, S>(lines: I) -> Vec<LogicalLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut emit = |line: LogicalLine| out.push(line);
    let state = lines
        .into_iter()
        .fold(PreprocessState::Idle, |state, raw| state.step(raw.as_ref(), &mut emit));
    state.finish(&mut emit);
    out
}
