use crate::error::Error;
use image::{DynamicImage, GenericImageView, GrayImage, ImageBuffer, Luma, Pixel};
use imageproc::filter::gaussian_blur_f32;

/// A decoded image that can be read as 8-bit intensities.
pub trait PixelBuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Intensity in [0, 255]; callers stay within `width` x `height`.
    fn get_pixel(&self, x: u32, y: u32) -> u8;
}

impl PixelBuffer for GrayImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn get_pixel(&self, x: u32, y: u32) -> u8 {
        ImageBuffer::get_pixel(self, x, y)[0]
    }
}

impl PixelBuffer for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn get_pixel(&self, x: u32, y: u32) -> u8 {
        GenericImageView::get_pixel(self, x, y).to_luma()[0]
    }
}

/// Wraps a row-major 8-bit buffer, e.g. one handed over by a camera driver.
pub fn gray_from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<GrayImage, Error> {
    let len = data.len();
    GrayImage::from_raw(width, height, data).ok_or_else(|| {
        Error::LoadError(format!(
            "buffer of {len} bytes does not describe a {width}x{height} image"
        ))
    })
}

/// Converts the buffer to a byte-depth grayscale image and smooths it.
///
/// The input is only read; the blurred copy is returned. `sigma` must be
/// finite and positive.
pub fn preprocess<B: PixelBuffer + ?Sized>(buffer: &B, sigma: f32) -> Result<GrayImage, Error> {
    if !sigma.is_finite() || sigma <= 0. {
        return Err(Error::ConfigError(format!(
            "blur sigma must be positive, got {sigma}"
        )));
    }
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return Err(Error::LoadError(format!(
            "image has no pixels ({width}x{height})"
        )));
    }
    let gray = GrayImage::from_fn(width, height, |x, y| Luma([buffer.get_pixel(x, y)]));
    Ok(gaussian_blur_f32(&gray, sigma))
}
