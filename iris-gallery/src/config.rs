use crate::error::Error;
use iris_core::config::{EncoderConfig, IrisConfig, MatchConfig};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path, path::PathBuf};

/// Contents of the YAML config file shared by the command line tools.
///
/// ```yaml
/// database: gallery.sqlite
/// encoder:
///   rings: 16
///   sectors: 32
///   code_length: 512
///   blur_sigma: 2.0
/// matcher:
///   threshold: 0.85
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// SQLite file holding the gallery
    pub database: PathBuf,
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub matcher: MatchConfig,
}

impl ServiceConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_reader(reader)?;
        config.iris_config().validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        Self::from_reader(File::open(path)?)
    }

    pub fn iris_config(&self) -> IrisConfig {
        IrisConfig {
            encoder: self.encoder.clone(),
            matcher: self.matcher.clone(),
        }
    }
}
