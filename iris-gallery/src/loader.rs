use crate::error::Error;
use image::DynamicImage;
use std::path::Path;

/// Decodes an image file. Any decoding failure is reported as a load error of
/// the iris engine.
pub fn load_image(path: &Path) -> Result<DynamicImage, Error> {
    image::open(path).map_err(|e| {
        iris_core::Error::LoadError(format!("{}: {}", path.display(), e)).into()
    })
}
