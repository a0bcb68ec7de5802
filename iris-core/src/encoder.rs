use crate::{
    code::{IrisCode, IrisCodeBits},
    config::EncoderConfig,
    error::Error,
    preprocess::{preprocess, PixelBuffer},
};
use std::f64::consts::TAU;

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
/// A sample is a 1 bit if it is brighter than at least this many neighbours.
const MAJORITY: usize = 4;

/// Turns a decoded image into an [`IrisCode`].
///
/// The smoothed image is sampled on a polar grid of `rings` x `sectors`
/// points around the image center. Each sample contributes one bit: whether
/// the pixel is brighter than the majority of its 8 neighbours. Comparing a
/// pixel with its neighbourhood instead of thresholding the raw intensity
/// makes the bits independent of uniform brightness shifts.
#[derive(Clone, Debug)]
pub struct IrisEncoder {
    config: EncoderConfig,
}

impl IrisEncoder {
    pub fn new(config: EncoderConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn code_length(&self) -> usize {
        self.config.code_length
    }

    /// Blurs the buffer and samples it. Only fails for buffers without pixels.
    pub fn encode<B: PixelBuffer + ?Sized>(&self, buffer: &B) -> Result<IrisCode, Error> {
        let smoothed = preprocess(buffer, self.config.blur_sigma)?;
        Ok(self.sample(&smoothed))
    }

    /// Samples an already smoothed, non-empty image.
    pub(crate) fn sample<B: PixelBuffer + ?Sized>(&self, image: &B) -> IrisCode {
        let (width, height) = (image.width(), image.height());
        let cx = f64::from(width) / 2.;
        let cy = f64::from(height) / 2.;
        let r_max = f64::from(width.min(height)) / 2.;

        let rings = self.config.rings;
        let sectors = self.config.sectors;

        let bits = (0..self.config.code_length)
            .map(|i| {
                let ring = i % rings;
                let sector = (i / rings) % sectors;
                let radius = (ring + 1) as f64 * r_max / rings as f64;
                let angle = sector as f64 * TAU / sectors as f64;
                let x = clamp_coord(cx + radius * angle.cos(), width);
                let y = clamp_coord(cy + radius * angle.sin(), height);
                local_contrast_bit(image, x, y)
            })
            .collect::<IrisCodeBits>();

        IrisCode::from_bits_unchecked(bits)
    }
}

/// Truncates toward zero and clamps into `[0, size - 1]`. Samples that leave
/// the image stick to the border, they never wrap around.
fn clamp_coord(value: f64, size: u32) -> u32 {
    // `as` saturates and maps NaN to 0
    (value as i64).clamp(0, i64::from(size) - 1) as u32
}

fn local_contrast_bit<B: PixelBuffer + ?Sized>(image: &B, x: u32, y: u32) -> bool {
    let max_x = i64::from(image.width()) - 1;
    let max_y = i64::from(image.height()) - 1;
    let center = image.get_pixel(x, y);

    let darker = NEIGHBOURS
        .iter()
        .filter(|(dx, dy)| {
            let nx = (i64::from(x) + dx).clamp(0, max_x) as u32;
            let ny = (i64::from(y) + dy).clamp(0, max_y) as u32;
            image.get_pixel(nx, ny) < center
        })
        .count();

    darker >= MAJORITY
}
