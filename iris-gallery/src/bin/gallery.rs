use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use iris_gallery::prelude::{IrisService, ServiceConfig};

#[derive(Parser)]
#[command(author, version, about = "Show what is enrolled in the gallery", long_about = None)]
struct Opts {
    /// path to the YAML config file
    #[arg(short, long, value_name = "FILE", required = true)]
    config: PathBuf,

    /// Also list every enrollment record
    #[arg(short, long, default_value = "false")]
    records: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    iris_gallery::init_tracing();
    let opts: Opts = Opts::parse();

    let config = ServiceConfig::from_file(&opts.config).context("loading config file")?;
    let service = IrisService::open(&config).context("opening gallery")?;

    let stats = service.stats()?;
    println!("Enrolled irises: {}", stats.total_records);
    println!("Code lengths: {:?}", stats.code_lengths);
    println!("Match threshold: {}", service.threshold());

    if opts.records {
        for record in service.records()? {
            println!(
                "#{} subject {} enrolled at {} ({} bits){}",
                record.id,
                record.subject,
                record.enrolled_at,
                record.code.len(),
                record
                    .image_path
                    .map(|p| format!(" from {p}"))
                    .unwrap_or_default()
            );
        }
    }

    Ok(())
}
