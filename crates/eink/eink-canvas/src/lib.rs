//! E-Ink Canvas
//!
//! Headless raster target for rendering e-ink screens on the host side.
//! The host hands finished images to the panel driver, so everything here is
//! plain memory: an [`InkColor`] per pixel, an `embedded-graphics`
//! [`DrawTarget`](embedded_graphics::draw_target::DrawTarget) implementation
//! and PNG export.
//!
//! # Example
//!
//! ```
//! use eink_canvas::{Canvas, InkColor};
//! use eink_specs::{displays::INKY_IMPRESSION_7_3, Orientation};
//! use embedded_graphics::{prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//!
//! let mut canvas = Canvas::for_spec(&INKY_IMPRESSION_7_3, Orientation::Horizontal);
//! Rectangle::new(Point::new(10, 10), Size::new(40, 20))
//!     .into_styled(PrimitiveStyle::with_fill(InkColor::Blue))
//!     .draw(&mut canvas)
//!     .unwrap();
//! assert_eq!(canvas.get_pixel(20, 20), Some(InkColor::Blue));
//! ```

mod framebuffer;
pub mod pixel_color;

pub use framebuffer::Canvas;
pub use pixel_color::InkColor;

/// Errors from exporting a canvas
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// Creating the output directory failed
    #[error("failed to prepare output path: {0}")]
    Io(#[from] std::io::Error),
    /// PNG encoding or writing failed
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
