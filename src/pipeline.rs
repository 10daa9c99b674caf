use crate::config::Config;
use crate::error::{AppError, Result};
use crate::gc::hydrator::Hydrator;
use crate::gc::preprocessor::Preprocessor;
use crate::gc::recognizer::classify;
use crate::gc::types::{LogEvent, LogicalLine};
use crate::run::aggregator::{PipelineState, RunAggregator};
use crate::run::jvm_run::JvmRun;
use chrono::{DateTime, FixedOffset};
use std::collections::VecDeque;
use std::io::BufRead;

fn to_event(hydrator: &mut Hydrator, line: LogicalLine) -> LogEvent {
    let event_type = classify(&line.body);
    hydrator.hydrate(line, event_type)
}

/// Drives one log through preprocessing, recognition, hydration and aggregation.
///
/// Lines must be pushed in file order. Once `finish` has returned the run, the
/// ingest refuses further input.
#[derive(Debug)]
pub struct Ingest {
    preprocessor: Preprocessor,
    hydrator: Hydrator,
    aggregator: Option<RunAggregator>,
}

impl Default for Ingest {
    fn default() -> Self {
        Self::new()
    }
}

impl Ingest {
    pub fn new() -> Self {
        Self::from_aggregator(RunAggregator::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self::from_aggregator(RunAggregator::new(config.max_unknown_samples))
    }

    fn from_aggregator(aggregator: RunAggregator) -> Self {
        Self {
            preprocessor: Preprocessor::new(),
            hydrator: Hydrator::new(),
            aggregator: Some(aggregator),
        }
    }

    pub fn state(&self) -> PipelineState {
        match &self.aggregator {
            None => PipelineState::Finalized,
            Some(aggregator) if aggregator.is_empty() && !self.preprocessor.is_accumulating() => {
                PipelineState::NotStarted
            }
            Some(_) => PipelineState::Ingesting,
        }
    }

    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let Ingest {
            preprocessor,
            hydrator,
            aggregator,
        } = self;
        let aggregator = aggregator.as_mut().ok_or(AppError::Finalized)?;
        preprocessor.feed(line, &mut |logical| {
            aggregator.push(to_event(hydrator, logical));
        });
        Ok(())
    }

    /// Flushes any buffered record and freezes the run.
    pub fn finish(&mut self) -> Result<JvmRun> {
        let mut aggregator = self.aggregator.take().ok_or(AppError::Finalized)?;
        let hydrator = &mut self.hydrator;
        self.preprocessor.finish(&mut |logical| {
            aggregator.push(to_event(hydrator, logical));
        });
        Ok(aggregator.finish_with_origin(self.hydrator.anchor().origin()))
    }
}

/// Parses an in-memory line sequence into a finalized run.
pub fn parse_lines<I, S>(lines: I) -> JvmRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = RunAggregator::default();
    let mut stream = EventStream::new(lines.into_iter());
    for event in stream.by_ref() {
        aggregator.push(event);
    }
    aggregator.finish_with_origin(stream.origin())
}

/// Parses a buffered reader. Only I/O failures are reported as errors.
pub fn parse_reader<R: BufRead>(reader: R, config: &Config) -> Result<JvmRun> {
    let mut ingest = Ingest::with_config(config);
    for line in reader.lines() {
        ingest.push_line(&line?)?;
    }
    ingest.finish()
}

/// Lazily yields events from a line iterator without building a run.
///
/// Wall-clock-only stamps that precede the first line carrying an uptime are yielded
/// as epoch microseconds, flagged by `LogEvent::wall_clock`.
pub struct EventStream<I> {
    lines: I,
    preprocessor: Preprocessor,
    hydrator: Hydrator,
    pending: VecDeque<LogicalLine>,
    exhausted: bool,
}

impl<I> EventStream<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            preprocessor: Preprocessor::new(),
            hydrator: Hydrator::new(),
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Wall-clock time of JVM start, once a line has shown both clocks.
    pub fn origin(&self) -> Option<DateTime<FixedOffset>> {
        self.hydrator.anchor().origin()
    }
}

impl<I, S> Iterator for EventStream<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = LogEvent;

    fn next(&mut self) -> Option<LogEvent> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(to_event(&mut self.hydrator, line));
            }
            if self.exhausted {
                return None;
            }
            let pending = &mut self.pending;
            match self.lines.next() {
                Some(raw) => self
                    .preprocessor
                    .feed(raw.as_ref(), &mut |line| pending.push_back(line)),
                None => {
                    self.exhausted = true;
                    self.preprocessor
                        .finish(&mut |line| pending.push_back(line));
                }
            }
        }
    }
}
