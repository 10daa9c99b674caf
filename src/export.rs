use crate::error::Result;
use crate::gc::types::{Generation, LogEvent};
use crate::run::jvm_run::JvmRun;
use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

fn export_dir(base_dir: Option<&str>) -> PathBuf {
    if let Some(custom_dir) = base_dir {
        PathBuf::from(shellexpand::tilde(custom_dir).to_string())
    } else {
        directories::ProjectDirs::from("com", "gclog", "gclog")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn export_path(base_dir: Option<&str>, extension: &str) -> Result<PathBuf> {
    let dir = export_dir(base_dir);
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    Ok(dir.join(format!("gc_run_{}.{}", timestamp, extension)))
}

pub fn export_run(run: &JvmRun, format: ExportFormat, base_dir: Option<&str>) -> Result<PathBuf> {
    match format {
        ExportFormat::Json => export_run_json(run, base_dir),
        ExportFormat::Csv => export_events_csv(run, base_dir),
    }
}

pub fn export_run_json(run: &JvmRun, base_dir: Option<&str>) -> Result<PathBuf> {
    let filepath = export_path(base_dir, "json")?;
    let json = serde_json::to_string_pretty(run)?;
    std::fs::write(&filepath, json)?;
    Ok(filepath)
}

pub fn export_events_csv(run: &JvmRun, base_dir: Option<&str>) -> Result<PathBuf> {
    let filepath = export_path(base_dir, "csv")?;
    write_events_csv(run.events(), BufWriter::new(File::create(&filepath)?))?;
    Ok(filepath)
}

/// One exported event; whole-heap sizes in bytes, CPU times in seconds.
#[derive(Debug, Serialize)]
struct EventRow {
    index: usize,
    event_type: &'static str,
    timestamp_us: u64,
    duration_us: Option<u64>,
    trigger: Option<String>,
    heap_before_bytes: Option<u64>,
    heap_after_bytes: Option<u64>,
    heap_capacity_bytes: Option<u64>,
    user_s: Option<f64>,
    sys_s: Option<f64>,
    real_s: Option<f64>,
}

impl EventRow {
    fn new(index: usize, event: &LogEvent) -> Self {
        let heap = event.region(Generation::Combined);
        Self {
            index,
            event_type: event.event_type.into(),
            timestamp_us: event.timestamp_us,
            duration_us: event.duration_us,
            trigger: event.trigger.map(|trigger| trigger.to_string()),
            heap_before_bytes: heap.map(|h| h.occupancy_before.bytes()),
            heap_after_bytes: heap.map(|h| h.occupancy_after.bytes()),
            heap_capacity_bytes: heap.map(|h| h.capacity.bytes()),
            user_s: event.cpu.map(|cpu| cpu.user_s),
            sys_s: event.cpu.map(|cpu| cpu.sys_s),
            real_s: event.cpu.map(|cpu| cpu.real_s),
        }
    }
}

/// One row per event, headed by the field names.
pub fn write_events_csv<W: Write>(events: &[LogEvent], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);
    for (index, event) in events.iter().enumerate() {
        writer.serialize(EventRow::new(index, event))?;
    }
    writer.flush()?;
    Ok(())
}
