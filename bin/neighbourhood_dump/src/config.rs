use log::{debug, info, trace};
use neighbourhood_rs::{
    neighbourhood::NeighbourhoodIterator, range::for_each_range, volume::VolumeCursor,
};
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::OutputFormat;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    shape: Vec<usize>,
    extent: Vec<usize>,

    #[serde(default)]
    centres: Vec<Vec<usize>>,

    #[serde(default)]
    scan_all: bool,
}

impl Config {
    pub fn write_neighbourhoods(
        &self,
        output_path: &Path,
        format: OutputFormat,
    ) -> Result<(), Box<dyn Error>> {
        info!("Writing neighbourhoods to {output_path:?}");

        let mut writer = BufWriter::new(File::create(output_path)?);
        self.write_to(&mut writer, format)?;
        writer.flush()?;

        Ok(())
    }

    fn write_to(&self, mut writer: impl Write, format: OutputFormat) -> Result<(), Box<dyn Error>> {
        info!("Shape: {:?}", self.shape);
        info!("Extent: {:?}", self.extent);

        if self.extent.len() != self.shape.len() {
            return Err(format!(
                "extent {:?} does not match shape {:?}",
                self.extent, self.shape
            )
            .into());
        }

        let centres = if self.scan_all {
            let mut centres = Vec::new();
            for_each_range(self.shape.iter().map(|&d| 0..d), |idx| {
                centres.push(idx.to_vec())
            });
            centres
        } else {
            self.centres.clone()
        };
        info!("Number of centres: {}", centres.len());

        for centre in &centres {
            let cursor = VolumeCursor::new(&self.shape, centre)?;
            let mut iter = NeighbourhoodIterator::new(&cursor, &self.extent);
            debug!("Centre {centre:?}: {} positions", iter.len());
            trace!("{iter}");

            writeln!(writer, "{iter}")?;
            match format {
                OutputFormat::Tuples => {
                    for pos in iter.positions() {
                        writeln!(writer, "{pos}")?;
                    }
                }
                OutputFormat::Summary => writeln!(writer, "{} positions", iter.len())?,
            }
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    info!("Loading config from path {path:?}");

    let config = std::fs::read_to_string(path)?;
    trace!("Loaded config {path:?}");

    let config: Config = toml::from_str(&config)?;
    trace!("Parsed config {path:?}");

    Ok(config)
}
