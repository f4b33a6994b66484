//! Error types

/// The host's settings object could not be decoded
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Not valid JSON, not an object, or a value of an unsupported type
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Image generation failed before anything was drawn
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Settings could not be decoded
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The device reported a resolution with a zero side
    #[error("device resolution {width}x{height} has no area")]
    EmptyResolution {
        /// Reported width
        width: u32,
        /// Reported height
        height: u32,
    },
}
