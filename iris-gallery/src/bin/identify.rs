use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use iris_gallery::prelude::{IrisService, ServiceConfig};

#[derive(Parser)]
#[command(author, version, about = "Search the gallery for an iris image", long_about = None)]
struct Opts {
    /// path to the YAML config file
    #[arg(short, long, value_name = "FILE", required = true)]
    config: PathBuf,

    /// iris image to identify
    #[arg(short, long, value_name = "FILE", required = true)]
    image: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    iris_gallery::init_tracing();
    let opts: Opts = Opts::parse();

    let config = ServiceConfig::from_file(&opts.config).context("loading config file")?;
    let service = IrisService::open(&config).context("opening gallery")?;

    let identification = service
        .identify_file(&opts.image)
        .context("identifying iris")?;

    match identification.candidate {
        Some(candidate) => println!(
            "Found a match! Subject {} ({:.2}%)",
            candidate.subject,
            candidate.score * 100.
        ),
        None => println!(
            "No match found (best score {:.2}%)",
            identification.best_score * 100.
        ),
    }

    Ok(())
}
