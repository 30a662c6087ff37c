//! # Bitmaps
//!
//! [`Bitmap`] is an 8-bit grayscale image (0 = black ink, 255 = paper) plus
//! a flag saying how it should be binarized on the way to the printer.
//! Rendered labels are thresholded; photographs loaded from disk are
//! dithered.
//!
//! Scaling only ever shrinks:
//!
//! ```
//! use labelpress::raster::Bitmap;
//!
//! let page = Bitmap::blank(1200, 800);
//! let scaled = page.scale_to_width(576);
//! assert_eq!((scaled.width(), scaled.height()), (576, 384));
//! ```

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

use crate::error::{LabelError, LabelResult};
use crate::protocol::graphics;

use super::dither;

const PAPER: Luma<u8> = Luma([255]);

/// Grayscale image headed for the print head.
#[derive(Debug, Clone)]
pub struct Bitmap {
    image: GrayImage,
    halftone: bool,
}

/// Packed 1-bit image, MSB-first rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width_dots: u16,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Raster {
    /// `GS v 0` commands for this raster, split into bands.
    pub fn commands(&self) -> Vec<Vec<u8>> {
        graphics::raster_chunks(self.width_dots, self.height, &self.data)
    }
}

impl Bitmap {
    /// All-white bitmap.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width.max(1), height.max(1), PAPER),
            halftone: false,
        }
    }

    /// Load an image file (BMP, PNG, ...) as a photograph (dithered).
    pub fn load(path: &Path) -> LabelResult<Self> {
        let image = image::open(path)?.to_luma8();
        Ok(Self {
            image,
            halftone: true,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_halftone(&self) -> bool {
        self.halftone
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    /// Luma at a pixel; out-of-range reads as paper.
    pub fn luma(&self, x: u32, y: u32) -> u8 {
        self.image
            .get_pixel_checked(x, y)
            .map_or(PAPER.0[0], |p| p.0[0])
    }

    /// Add ink with the given coverage (0.0..=1.0). Pixels only get darker.
    pub fn darken(&mut self, x: i64, y: i64, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(px) = self.image.get_pixel_mut_checked(x as u32, y as u32) {
            let ink = (255.0 * (1.0 - coverage.clamp(0.0, 1.0))).round() as u8;
            px.0[0] = px.0[0].min(ink);
        }
    }

    /// Solid black rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32) {
        for dy in 0..height as i64 {
            for dx in 0..width as i64 {
                self.darken(x + dx, y + dy, 1.0);
            }
        }
    }

    /// Shrink to at most `max_width` pixels wide, preserving aspect ratio.
    ///
    /// `new_height = round(max_width / width × height)`. Narrower bitmaps
    /// are returned unchanged.
    pub fn scale_to_width(self, max_width: u32) -> Self {
        let (width, height) = self.image.dimensions();
        if width <= max_width || max_width == 0 {
            return self;
        }
        let new_height = ((max_width as f64 / width as f64) * height as f64).round() as u32;
        let image = imageops::resize(&self.image, max_width, new_height.max(1), FilterType::Triangle);
        Self {
            image,
            halftone: self.halftone,
        }
    }

    /// Binarize for the printer, thresholding line art and dithering photos.
    pub fn to_raster(&self) -> LabelResult<Raster> {
        let (width, height) = self.image.dimensions();
        let width_dots = u16::try_from(width)
            .map_err(|_| LabelError::Render(format!("bitmap too wide for raster: {}", width)))?;
        let (w, h) = (width as usize, height as usize);
        let luma = self.image.as_raw();
        let data = if self.halftone {
            dither::dither_luma(w, h, luma)
        } else {
            dither::threshold_luma(w, h, luma)
        };
        Ok(Raster {
            width_dots,
            height: h,
            data,
        })
    }

    /// Write as PNG (preview output).
    pub fn save_png(&self, path: &Path) -> LabelResult<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(LabelError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_down_preserves_aspect() {
        let scaled = Bitmap::blank(1200, 800).scale_to_width(576);
        assert_eq!(scaled.width(), 576);
        assert_eq!(scaled.height(), 384);
    }

    #[test]
    fn test_never_upscales() {
        let scaled = Bitmap::blank(300, 100).scale_to_width(576);
        assert_eq!((scaled.width(), scaled.height()), (300, 100));
    }

    #[test]
    fn test_scale_rounds_height() {
        // 576 / 1000 * 333 = 191.808
        let scaled = Bitmap::blank(1000, 333).scale_to_width(576);
        assert_eq!(scaled.height(), 192);
    }

    #[test]
    fn test_darken_only_darkens() {
        let mut bmp = Bitmap::blank(4, 4);
        bmp.darken(1, 1, 1.0);
        bmp.darken(1, 1, 0.2);
        bmp.darken(-1, 9, 1.0);
        assert_eq!(bmp.luma(1, 1), 0);
        assert_eq!(bmp.luma(0, 0), 255);
    }

    #[test]
    fn test_to_raster_threshold() {
        let mut bmp = Bitmap::blank(16, 2);
        bmp.fill_rect(0, 0, 4, 1);
        let raster = bmp.to_raster().unwrap();
        assert_eq!(raster.width_dots, 16);
        assert_eq!(raster.height, 2);
        assert_eq!(raster.data, vec![0xF0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_raster_commands_band_tall_images() {
        let raster = Bitmap::blank(8, 600).to_raster().unwrap();
        assert_eq!(raster.commands().len(), 3);
    }

    #[test]
    fn test_load_bmp_is_halftone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoe.bmp");
        GrayImage::from_pixel(10, 10, Luma([0])).save(&path).unwrap();

        let bmp = Bitmap::load(&path).unwrap();
        assert!(bmp.is_halftone());
        assert_eq!(bmp.width(), 10);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = Bitmap::load(Path::new("/nonexistent/x.bmp")).unwrap_err();
        assert!(matches!(err, LabelError::Image(_) | LabelError::Io(_)));
    }
}
