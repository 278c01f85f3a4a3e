use anyhow::{bail, Context};
use kernel_bench::config::Config;
use kernel_bench::reporter::{MetricsReport, OutputFormat, Reporter};
use kernel_bench::MetricsBundle;
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = env::args().collect();
    let run_dir = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = match args.get(2) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let entries = fs::read_dir(&run_dir)
        .with_context(|| format!("Failed to list run directory: {}", run_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        // Binaries and other non-text outputs are not metric reports
        if let Ok(content) = fs::read_to_string(&path) {
            files.push((path.display().to_string(), content));
        }
    }

    let listing = files
        .iter()
        .map(|(path, content)| (path.as_str(), content.as_str()));
    let bundle = MetricsBundle::from_files(listing, &config.files);
    let Some(metrics) = bundle.aggregate() else {
        bail!("No {} found in {}", config.files.metrics, run_dir.display());
    };

    let report = MetricsReport::build(&metrics, &config.analysis);
    Reporter::new(OutputFormat::Console).report(&report)?;

    Ok(())
}
