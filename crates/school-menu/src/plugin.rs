//! Host plugin entry point

use chrono::NaiveDateTime;
use eink_canvas::Canvas;
use eink_specs::{ColorMode, DisplaySpec, Orientation};

use crate::{
    error::PluginError,
    render::MenuRenderer,
    settings::Settings,
    source::{MenuSource, MockMenuSource},
};

/// What the host knows about the attached panel
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Native `(width, height)` in landscape
    pub resolution: (u32, u32),
    /// How the panel is mounted
    pub orientation: Orientation,
    /// Whether the panel shows any ink besides black and white
    pub color: bool,
}

impl DeviceConfig {
    /// Device description from a known panel
    pub fn from_spec(spec: &DisplaySpec, orientation: Orientation) -> Self {
        Self {
            resolution: (spec.width, spec.height),
            orientation,
            color: spec.supports_color(),
        }
    }

    /// Canvas `(width, height)`; vertical mounting swaps the sides
    pub fn canvas_size(&self) -> (u32, u32) {
        let (width, height) = self.resolution;
        match self.orientation {
            Orientation::Horizontal => (width, height),
            Orientation::Vertical => (height, width),
        }
    }

    /// Pigment set assumed for the canvas
    pub fn color_mode(&self) -> ColorMode {
        if self.color {
            ColorMode::SevenColor
        } else {
            ColorMode::Monochrome
        }
    }
}

/// The school lunch menu plugin
#[derive(Debug, Clone, Default)]
pub struct SchoolMenuPlugin<S = MockMenuSource> {
    source: S,
}

impl SchoolMenuPlugin<MockMenuSource> {
    /// Plugin backed by the built-in sample menus
    pub fn new() -> Self {
        Self::with_source(MockMenuSource::new())
    }
}

impl<S: MenuSource> SchoolMenuPlugin<S> {
    /// Plugin backed by another menu source
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Menu source in use
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Render the menu for `device` as of `now`
    pub fn generate_image(
        &self,
        settings: &Settings,
        device: &DeviceConfig,
        now: NaiveDateTime,
    ) -> Result<Canvas, PluginError> {
        let (width, height) = device.canvas_size();
        if width == 0 || height == 0 {
            return Err(PluginError::EmptyResolution { width, height });
        }
        let config = settings.to_render_config(device.color);
        let mut canvas = Canvas::new(width, height, device.color_mode());
        let plan = MenuRenderer::new(config).render(&self.source, now, &mut canvas);
        // Canvas drawing cannot fail
        match plan {
            Ok(_) => {}
            Err(never) => match never {},
        }
        Ok(canvas)
    }

    /// Same as [`generate_image`](Self::generate_image) with settings as JSON
    pub fn generate_image_from_json(
        &self,
        settings_json: &str,
        device: &DeviceConfig,
        now: NaiveDateTime,
    ) -> Result<Canvas, PluginError> {
        let settings = Settings::from_json(settings_json)?;
        self.generate_image(&settings, device, now)
    }
}
