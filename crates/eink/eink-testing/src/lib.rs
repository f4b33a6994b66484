//! E-Ink UI Testing Utilities
//!
//! Playwright-inspired headless testing API for rendered e-ink screens.
//!
//! # Quick start
//!
//! ```no_run
//! use eink_testing::{InkColor, TestCanvas};
//! use embedded_graphics::{prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//!
//! let mut t = TestCanvas::new(250, 122);
//!
//! // Draw UI content
//! Rectangle::new(Point::new(10, 10), Size::new(40, 20))
//!     .into_styled(PrimitiveStyle::with_fill(InkColor::Black))
//!     .draw(&mut *t)
//!     .unwrap();
//!
//! // Register the component so it can be queried by test ID
//! t.register_component("header", "Title", (10, 10), (40, 20));
//!
//! // Assertions
//! t.assert_pixel(20, 15, InkColor::Black).unwrap();
//! t.assert_has_component("header").unwrap();
//! ```
//!
//! # Golden screenshot testing
//!
//! ```no_run
//! # use eink_testing::TestCanvas;
//! # let t = TestCanvas::new(100, 100);
//! // First run: set UPDATE_GOLDEN=1 to create/update the reference file.
//! t.assert_matches_golden("tests/golden/my_screen.png", 0).unwrap();
//! ```

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]

use std::path::Path;

use embedded_graphics::{prelude::*, primitives::Rectangle};

pub use eink_canvas::{Canvas, InkColor};
pub use eink_specs::{ColorMode, DisplaySpec, Orientation};

// ─────────────────────────────────────────────────────────────────────────────
// ComponentRef
// ─────────────────────────────────────────────────────────────────────────────

/// A UI component registered in the [`TestCanvas`]'s component registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRef {
    /// The test identifier (analogous to `data-testid` in web testing).
    pub test_id: String,
    /// Broad component category, e.g. `"Title"`, `"Item"`, `"DayHeader"`.
    pub component_type: String,
    /// Top-left corner in display coordinates.
    pub position: (i32, i32),
    /// Width × height in pixels.
    pub size: (u32, u32),
}

impl ComponentRef {
    /// The bounding rectangle as an `embedded-graphics` [`Rectangle`].
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.position.0, self.position.1),
            Size::new(self.size.0, self.size.1),
        )
    }

    /// Centre of the component's bounding box.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TestCanvas
// ─────────────────────────────────────────────────────────────────────────────

/// Headless canvas for rendering tests.
///
/// Wraps [`Canvas`] and adds:
/// - A component registry queryable by test ID
/// - Pixel and region assertions
/// - Screenshot capture and golden-file comparison
///
/// Derefs to [`Canvas`], which implements [`DrawTarget`], so you can draw
/// embedded-graphics primitives directly.
pub struct TestCanvas {
    inner: Canvas,
    components: Vec<ComponentRef>,
}

impl TestCanvas {
    /// Create a seven-colour canvas with exact pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_color_mode(width, height, ColorMode::SevenColor)
    }

    /// Create a canvas with exact pixel dimensions and ink set.
    pub fn with_color_mode(width: u32, height: u32, mode: ColorMode) -> Self {
        Self::from_canvas(Canvas::new(width, height, mode))
    }

    /// Create a canvas sized to a specific display spec.
    pub fn with_spec(spec: &DisplaySpec, orientation: Orientation) -> Self {
        Self::from_canvas(Canvas::for_spec(spec, orientation))
    }

    /// Wrap an already rendered canvas.
    pub fn from_canvas(canvas: Canvas) -> Self {
        Self {
            inner: canvas,
            components: Vec::new(),
        }
    }

    // ── Canvas access ────────────────────────────────────────────────────────

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Return the ink at `(x, y)`, or `None` if out of bounds.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<InkColor> {
        self.inner.get_pixel(x, y)
    }

    /// Reset every pixel to white.
    pub fn clear_display(&mut self) {
        self.inner.clear();
    }

    /// Number of pixels that differ from `other`.
    ///
    /// Canvases of different size count every pixel of the larger one.
    pub fn pixel_diff_count(&self, other: &TestCanvas) -> usize {
        if self.width() != other.width() || self.height() != other.height() {
            return self.inner.pixels().len().max(other.inner.pixels().len());
        }
        self.inner
            .pixels()
            .iter()
            .zip(other.inner.pixels())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Smallest rectangle enclosing every pixel that is not `background`.
    pub fn content_bounds(&self, background: InkColor) -> Option<Rectangle> {
        let mut min = (u32::MAX, u32::MAX);
        let mut max = (0u32, 0u32);
        let mut found = false;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.pixel_at(x, y).is_some_and(|p| p != background) {
                    found = true;
                    min = (min.0.min(x), min.1.min(y));
                    max = (max.0.max(x), max.1.max(y));
                }
            }
        }
        found.then(|| {
            Rectangle::with_corners(
                Point::new(min.0 as i32, min.1 as i32),
                Point::new(max.0 as i32, max.1 as i32),
            )
        })
    }

    // ── Pixel assertions ─────────────────────────────────────────────────────

    /// Assert that pixel `(x, y)` shows the expected ink.
    ///
    /// Returns `Err` with a descriptive message on mismatch.
    pub fn assert_pixel(&self, x: u32, y: u32, expected: InkColor) -> Result<(), String> {
        let actual = self
            .pixel_at(x, y)
            .ok_or_else(|| format!("Pixel ({x}, {y}) is out of bounds"))?;
        if actual != expected {
            Err(format!(
                "assert_pixel({x}, {y}): expected {}, got {}",
                expected.name(),
                actual.name()
            ))
        } else {
            Ok(())
        }
    }

    /// Assert that every pixel inside `rect` has the given ink.
    pub fn assert_region_uniform(&self, rect: Rectangle, color: InkColor) -> Result<(), String> {
        let tl = rect.top_left;
        for dy in 0..rect.size.height {
            for dx in 0..rect.size.width {
                let x = (tl.x as u32).wrapping_add(dx);
                let y = (tl.y as u32).wrapping_add(dy);
                self.assert_pixel(x, y, color)
                    .map_err(|e| format!("assert_region_uniform failed in {rect:?}: {e}"))?;
            }
        }
        Ok(())
    }

    /// Assert that `rect` contains **at least one** pixel with the given ink.
    pub fn assert_region_contains(&self, rect: Rectangle, color: InkColor) -> Result<(), String> {
        if self.pixel_count_of_color(rect, color) > 0 {
            Ok(())
        } else {
            Err(format!(
                "assert_region_contains: no {} pixel found in {rect:?}",
                color.name()
            ))
        }
    }

    /// Count how many pixels in `rect` show `color`.
    pub fn pixel_count_of_color(&self, rect: Rectangle, color: InkColor) -> usize {
        let tl = rect.top_left;
        let mut count = 0;
        for dy in 0..rect.size.height {
            for dx in 0..rect.size.width {
                let x = (tl.x as u32).wrapping_add(dx);
                let y = (tl.y as u32).wrapping_add(dy);
                if self.pixel_at(x, y) == Some(color) {
                    count += 1;
                }
            }
        }
        count
    }

    // ── Component registry ───────────────────────────────────────────────────

    /// Register (or update) a component by test ID.
    ///
    /// Call this after rendering a screen to annotate where each logical
    /// component sits, so tests can use [`query_by_test_id`] to look it up.
    ///
    /// [`query_by_test_id`]: TestCanvas::query_by_test_id
    pub fn register_component(
        &mut self,
        test_id: &str,
        component_type: &str,
        position: (i32, i32),
        size: (u32, u32),
    ) {
        if let Some(existing) = self.components.iter_mut().find(|c| c.test_id == test_id) {
            existing.component_type = component_type.to_string();
            existing.position = position;
            existing.size = size;
        } else {
            self.components.push(ComponentRef {
                test_id: test_id.to_string(),
                component_type: component_type.to_string(),
                position,
                size,
            });
        }
    }

    /// Remove all registered components.
    pub fn clear_components(&mut self) {
        self.components.clear();
    }

    /// Find a component by test ID in the local registry.
    pub fn query_by_test_id(&self, test_id: &str) -> Option<&ComponentRef> {
        self.components.iter().find(|c| c.test_id == test_id)
    }

    /// All components of a given type, in registration order.
    pub fn query_all_by_type(&self, component_type: &str) -> Vec<&ComponentRef> {
        self.components
            .iter()
            .filter(|c| c.component_type == component_type)
            .collect()
    }

    /// Return all registered components.
    pub fn components(&self) -> &[ComponentRef] {
        &self.components
    }

    /// Total number of registered components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Assert that a component with `test_id` exists in the registry.
    pub fn assert_has_component(&self, test_id: &str) -> Result<(), String> {
        self.query_by_test_id(test_id)
            .ok_or_else(|| format!("Component '{test_id}' not found"))
            .map(|_| ())
    }

    // ── Screenshot utilities ─────────────────────────────────────────────────

    /// Save the current canvas as a PNG.
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        self.inner.save_png(path)?;
        Ok(())
    }

    /// Save the current canvas as the golden reference PNG.
    ///
    /// Parent directories are created automatically.
    pub fn save_golden(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        self.screenshot(path)
    }

    /// Assert the current canvas matches a golden reference PNG.
    ///
    /// `threshold` is the maximum per-channel absolute difference that is still
    /// considered equal (0 = exact match).
    ///
    /// Set the `UPDATE_GOLDEN=1` environment variable to **update** the golden
    /// file instead of asserting:
    ///
    /// ```bash
    /// UPDATE_GOLDEN=1 cargo test
    /// ```
    pub fn assert_matches_golden(
        &self,
        golden_path: impl AsRef<Path>,
        threshold: u8,
    ) -> Result<(), String> {
        let golden_path = golden_path.as_ref();

        if std::env::var("UPDATE_GOLDEN").is_ok() {
            return self.save_golden(golden_path).map_err(|e| {
                format!(
                    "Failed to save golden '{p}': {e}",
                    p = golden_path.display()
                )
            });
        }

        let current = self.inner.to_rgb_image();
        let golden = image::open(golden_path)
            .map_err(|e| {
                format!(
                    "Failed to open golden '{}': {e}\nRun with UPDATE_GOLDEN=1 to create it.",
                    golden_path.display()
                )
            })?
            .to_rgb8();

        if current.dimensions() != golden.dimensions() {
            let (cw, ch) = current.dimensions();
            let (gw, gh) = golden.dimensions();
            return Err(format!(
                "Dimension mismatch: screenshot is {cw}×{ch}, golden is {gw}×{gh}"
            ));
        }

        let diff_pixels = current
            .pixels()
            .zip(golden.pixels())
            .filter(|(cp, gp)| {
                cp.0.iter()
                    .zip(gp.0.iter())
                    .any(|(&a, &b)| a.abs_diff(b) > threshold)
            })
            .count();

        if diff_pixels > 0 {
            Err(format!(
                "{diff_pixels} pixels differ from golden '{}' (threshold={threshold})",
                golden_path.display()
            ))
        } else {
            Ok(())
        }
    }

    // ── Canvas access ────────────────────────────────────────────────────────

    /// Borrow the wrapped canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.inner
    }

    /// Mutably borrow the wrapped canvas.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.inner
    }

    /// Unwrap into the rendered canvas.
    pub fn into_canvas(self) -> Canvas {
        self.inner
    }
}

impl std::ops::Deref for TestCanvas {
    type Target = Canvas;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl std::ops::DerefMut for TestCanvas {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
