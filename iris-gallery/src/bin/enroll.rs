use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use iris_gallery::prelude::{IrisService, ServiceConfig};

#[derive(Parser)]
#[command(author, version, about = "Enroll an iris image for a subject", long_about = None)]
struct Opts {
    /// path to the YAML config file
    #[arg(short, long, value_name = "FILE", required = true)]
    config: PathBuf,

    /// id of the subject the iris belongs to
    #[arg(short, long, value_name = "ID", required = true)]
    subject: i64,

    /// iris image to enroll
    #[arg(short, long, value_name = "FILE", required = true)]
    image: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    iris_gallery::init_tracing();
    let opts: Opts = Opts::parse();

    let config = ServiceConfig::from_file(&opts.config).context("loading config file")?;
    let service = IrisService::open(&config).context("opening gallery")?;

    let record = service
        .enroll_file(opts.subject, &opts.image)
        .with_context(|| format!("enrolling subject {}", opts.subject))?;

    println!(
        "Enrolled subject {} (record {}, {} bits)",
        record.subject,
        record.id,
        record.code.len()
    );

    Ok(())
}
