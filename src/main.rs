use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use gclog::{
    cli::{Cli, OutputFormat},
    config::Config,
    export, logging,
    pipeline::Ingest,
    summary::RunSummary,
};
use std::fs::File;
use std::io::{BufRead, BufReader};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(threshold) = cli.threshold {
        config.bottleneck_throughput_threshold = threshold;
    }
    if let Some(dir) = &cli.output_dir {
        config.export_dir = Some(dir.clone());
    }

    let mut ingest = Ingest::with_config(&config);
    for path in &cli.files {
        let file =
            File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.wrap_err_with(|| format!("failed to read {}", path.display()))?;
            ingest.push_line(&line)?;
        }
    }
    let run = ingest.finish()?;

    let summary = RunSummary::from_run(&run, config.bottleneck_throughput_threshold);
    match cli.format {
        OutputFormat::Text => print!("{}", summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if let Some(format) = cli.export {
        let export_dir = config.export_dir().map(|dir| dir.to_string_lossy().to_string());
        let path = export::export_run(&run, format, export_dir.as_deref())?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}
