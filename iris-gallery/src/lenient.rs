use iris_core::{similarity, IrisCode};

/// Scoring used when scanning a whole gallery.
///
/// A gallery may still hold codes written with a different code length.
/// Those cannot be compared bit by bit, so they score 1.0 only when both codes
/// are identical and 0.0 otherwise. The strict [`similarity`] is unchanged and
/// keeps reporting the mismatch.
///
/// Codes of different length are never equal, so in practice such a stored
/// code always scores 0.0.
pub fn lenient_similarity(probe: &IrisCode, stored: &IrisCode) -> Result<f64, iris_core::Error> {
    match similarity(probe, stored) {
        Err(iris_core::Error::LengthMismatch { left, right }) => {
            tracing::warn!(left, right, "comparing iris codes of different length");
            Ok(if probe == stored { 1.0 } else { 0.0 })
        }
        res => res,
    }
}
