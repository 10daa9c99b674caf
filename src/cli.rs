use crate::export::ExportFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "gclog")]
#[command(version)]
#[command(about = "Summarize JVM garbage collection logs", long_about = None)]
pub struct Cli {
    #[arg(
        required = true,
        help = "GC log files, oldest first when the log was rotated"
    )]
    pub files: Vec<PathBuf>,

    #[arg(
        short = 't',
        long,
        help = "Bottleneck throughput threshold in percent (e.g. 90)",
        value_parser = parse_percent
    )]
    pub threshold: Option<f64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, value_enum, help = "Also write the run to a file")]
    pub export: Option<ExportFormat>,

    #[arg(short, long, help = "Directory for exported files")]
    pub output_dir: Option<String>,

    #[arg(
        short = 'c',
        long,
        help = "Path to configuration file",
        env = "GCLOG_CONFIG"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Log pipeline diagnostics to stderr")]
    pub verbose: bool,
}

fn parse_percent(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is outside 0..=100", value))
    }
}
