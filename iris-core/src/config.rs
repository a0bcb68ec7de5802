use crate::error::Error;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RINGS: usize = 16;
pub const DEFAULT_SECTORS: usize = 32;
pub const DEFAULT_CODE_LENGTH: usize = 512;
pub const DEFAULT_BLUR_SIGMA: f32 = 2.0;
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.85;

/// Sampling grid and smoothing parameters of the encoder.
///
/// Every deployment that shares a gallery must use the same values, otherwise
/// previously enrolled codes stop being comparable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Number of concentric sampling rings (R)
    pub rings: usize,
    /// Number of angular sectors per ring (S)
    pub sectors: usize,
    /// Number of bits in a code (L)
    pub code_length: usize,
    /// Standard deviation of the Gaussian blur applied before sampling
    pub blur_sigma: f32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            rings: DEFAULT_RINGS,
            sectors: DEFAULT_SECTORS,
            code_length: DEFAULT_CODE_LENGTH,
            blur_sigma: DEFAULT_BLUR_SIGMA,
        }
    }
}

impl EncoderConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.rings == 0 || self.sectors == 0 {
            return Err(Error::ConfigError(
                "rings and sectors must be positive".to_owned(),
            ));
        }
        if self.code_length == 0 {
            return Err(Error::ConfigError("code_length must be positive".to_owned()));
        }
        match self.rings.checked_mul(self.sectors) {
            Some(cells) if cells >= self.code_length => {}
            _ => {
                return Err(Error::ConfigError(format!(
                    "grid of {} rings x {} sectors cannot hold {} bits",
                    self.rings, self.sectors, self.code_length
                )))
            }
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0. {
            return Err(Error::ConfigError(format!(
                "blur_sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimal similarity for a match, inclusive
    pub threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(0. ..=1.).contains(&self.threshold) {
            return Err(Error::ConfigError(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrisConfig {
    pub encoder: EncoderConfig,
    pub matcher: MatchConfig,
}

impl IrisConfig {
    pub fn validate(&self) -> Result<(), Error> {
        self.encoder.validate()?;
        self.matcher.validate()
    }
}
