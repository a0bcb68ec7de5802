use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use iris_gallery::prelude::{IrisService, ServiceConfig};

#[derive(Parser)]
#[command(author, version, about = "Compare an iris image with a subject's enrolled iris", long_about = None)]
struct Opts {
    /// path to the YAML config file
    #[arg(short, long, value_name = "FILE", required = true)]
    config: PathBuf,

    /// id of the subject to verify against
    #[arg(short, long, value_name = "ID", required = true)]
    subject: i64,

    /// iris image to compare
    #[arg(short, long, value_name = "FILE", required = true)]
    image: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    iris_gallery::init_tracing();
    let opts: Opts = Opts::parse();

    let config = ServiceConfig::from_file(&opts.config).context("loading config file")?;
    let service = IrisService::open(&config).context("opening gallery")?;

    let result = service
        .verify_file(opts.subject, &opts.image)
        .with_context(|| format!("verifying subject {}", opts.subject))?;

    println!(
        "Similarity: {:.2}% | Decision: {}",
        result.similarity * 100.,
        result.decision
    );

    Ok(())
}
