//! Deterministic iris template engine.
//!
//! A decoded image is smoothed, sampled on a polar grid and turned into a
//! fixed-length [`IrisCode`]. Codes are compared by normalized Hamming
//! distance, either 1:1 against a stored code or 1:N against a [`Gallery`].
pub(crate) mod code;
pub mod config;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod gallery;
pub(crate) mod matcher;
pub mod prelude;
pub(crate) mod preprocess;
#[cfg(test)]
pub(crate) mod tests;

pub use code::{IrisCode, IrisCodeBits};
pub use encoder::IrisEncoder;
pub use error::Error;
pub use gallery::{
    best_match, identify, is_duplicate, Candidate, Gallery, GalleryEntry, GallerySearch,
    Identification,
};
pub use matcher::{compare, decide, hamming_distance, similarity, ComparisonResult, Decision};
pub use preprocess::{gray_from_raw, preprocess, PixelBuffer};
