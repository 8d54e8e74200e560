use clap::{Parser, ValueEnum};
use log::info;
use std::{error::Error, path::PathBuf};

use crate::config::load_config;

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input config file path.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Output file path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tuples)]
    pub format: OutputFormat,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    /// Every position of every neighbourhood.
    #[default]
    Tuples,
    /// Number of positions of every neighbourhood.
    Summary,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let args = Args::parse();
    info!("Config path: {:?}", args.config);
    info!("Output path: {:?}", args.output);
    info!("Format: {:?}", args.format);

    let config = load_config(&args.config)?;
    config.write_neighbourhoods(&args.output, args.format)?;

    Ok(())
}
