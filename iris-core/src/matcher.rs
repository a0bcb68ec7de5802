use crate::{code::IrisCode, error::Error};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Match,
    NoMatch,
}

impl Decision {
    pub fn is_match(self) -> bool {
        self == Decision::Match
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Match => write!(f, "MATCH"),
            Decision::NoMatch => write!(f, "NO_MATCH"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonResult {
    pub similarity: f64,
    pub decision: Decision,
}

/// Fraction of differing bit positions, in [0, 1].
///
/// Codes of different length are never truncated or padded.
pub fn hamming_distance(a: &IrisCode, b: &IrisCode) -> Result<f64, Error> {
    let differences = a.count_differences(b)?;
    Ok(differences as f64 / a.len() as f64)
}

pub fn similarity(a: &IrisCode, b: &IrisCode) -> Result<f64, Error> {
    Ok(1. - hamming_distance(a, b)?)
}

/// The threshold is inclusive.
pub fn decide(similarity: f64, threshold: f64) -> Decision {
    if similarity >= threshold {
        Decision::Match
    } else {
        Decision::NoMatch
    }
}

/// 1:1 verification of `probe` against a stored code.
pub fn compare(probe: &IrisCode, stored: &IrisCode, threshold: f64) -> Result<ComparisonResult, Error> {
    let similarity = similarity(probe, stored)?;
    Ok(ComparisonResult {
        similarity,
        decision: decide(similarity, threshold),
    })
}
