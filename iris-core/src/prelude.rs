pub use super::code::IrisCode;
pub use super::config::{EncoderConfig, IrisConfig, MatchConfig};
pub use super::encoder::IrisEncoder;
pub use super::error::Error;
pub use super::gallery::{Gallery, GalleryEntry, GallerySearch, Identification};
pub use super::matcher::{compare, decide, similarity, ComparisonResult, Decision};
pub use super::preprocess::PixelBuffer;
