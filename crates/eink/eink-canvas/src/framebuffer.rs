//! CPU-side canvas the renderer draws into
//!
//! One [`InkColor`] per pixel. Colours are snapped to the panel's inks as
//! they are written, so the buffer always holds exactly what the panel can
//! show.

use std::path::Path;

use eink_specs::{ColorMode, DisplaySpec, Orientation};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use image::{Rgb, RgbImage};

use crate::pixel_color::InkColor;
use crate::CanvasError;

/// In-memory raster sized to a display
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<InkColor>,
    width: u32,
    height: u32,
    color_mode: ColorMode,
}

impl Canvas {
    /// Create a white canvas for a panel with the given inks
    pub fn new(width: u32, height: u32, color_mode: ColorMode) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            pixels: vec![InkColor::White; size],
            width,
            height,
            color_mode,
        }
    }

    /// Create a white canvas sized for `spec` mounted in `orientation`
    pub fn for_spec(spec: &DisplaySpec, orientation: Orientation) -> Self {
        let (width, height) = spec.resolution(orientation);
        Self::new(width, height, spec.color_mode)
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Inks this canvas is restricted to
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Raw pixel slice in row-major order
    pub fn pixels(&self) -> &[InkColor] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set pixel at coordinates; out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, color: InkColor) {
        let ink = color.for_mode(self.color_mode);
        if let Some(slot) = self.index(x, y).and_then(|i| self.pixels.get_mut(i)) {
            *slot = ink;
        }
    }

    /// Get pixel at coordinates
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<InkColor> {
        self.index(x, y)
            .and_then(|i| self.pixels.get(i))
            .copied()
    }

    /// Fill entire canvas with color
    pub fn fill(&mut self, color: InkColor) {
        let ink = color.for_mode(self.color_mode);
        self.pixels.fill(ink);
    }

    /// Reset to a white page
    pub fn clear(&mut self) {
        self.pixels.fill(InkColor::White);
    }

    /// Number of pixels showing `color`
    pub fn count_ink(&self, color: InkColor) -> usize {
        self.pixels.iter().filter(|p| **p == color).count()
    }

    /// Convert to an 8-bit RGB image using each ink's saturated value
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb(self.get_pixel(x, y).unwrap_or_default().to_rgb())
        })
    }

    /// Encode as PNG at `path`, creating parent directories.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), CanvasError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.to_rgb_image().save(path)?;
        Ok(())
    }
}

impl DrawTarget for Canvas {
    type Color = InkColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let ink = color.for_mode(self.color_mode);
        for y in area.top_left.y..=bottom_right.y {
            let row_start = self.index(area.top_left.x as u32, y as u32);
            let row_end = self.index(bottom_right.x as u32, y as u32);
            if let (Some(start), Some(end)) = (row_start, row_end) {
                if let Some(row) = self.pixels.get_mut(start..=end) {
                    row.fill(ink);
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
