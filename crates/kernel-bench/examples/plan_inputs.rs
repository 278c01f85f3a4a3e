use kernel_bench::config::Config;
use kernel_bench::input::{DriverGenOptions, InputConfiguration};
use kernel_bench::StructureDescriptor;
use std::env;
use std::fs;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        anyhow::bail!(
            "usage: plan_inputs <kernel.rise> <structure-report.txt> [dimension=size ...]"
        );
    }
    let kernel = &args[1];
    let report = fs::read_to_string(&args[2])?;
    let config = Config::default();
    let default_size = config.analysis.default_dimension_size;

    let descriptor = StructureDescriptor::parse(&report);
    if !descriptor.has_structure() {
        println!("No structure information; flat dimension {default_size}");
    }

    let mut inputs = InputConfiguration::derive_initial(&descriptor, default_size);
    for edit in &args[3..] {
        let Some((name, size)) = edit.split_once('=') else {
            anyhow::bail!("expected dimension=size, got {}", edit);
        };
        inputs = inputs.update_dimension(name, size.parse()?)?;
    }

    let dimension = inputs
        .dimensions()
        .first()
        .map(|d| d.size)
        .unwrap_or(default_size);
    let options = DriverGenOptions::from_defaults(kernel.as_str(), dimension, &config.driver)
        .with_input_config(&inputs);
    options.validate()?;

    println!("{}", options.to_json()?);
    Ok(())
}
