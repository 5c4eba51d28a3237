use std::time::Duration;

/// Color scheme preference for the desktop UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    /// Follow the operating system at startup.
    System,
    Light,
    Dark,
}

impl ThemeChoice {
    pub fn name(self) -> &'static str {
        match self {
            ThemeChoice::System => "System",
            ThemeChoice::Light => "Light",
            ThemeChoice::Dark => "Dark",
        }
    }
}

/// All user-tunable settings for the filter studio.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Display frame that loaded images are scaled to fit.
    pub frame_width: u32,
    pub frame_height: u32,
    /// Multiplier applied to the fit-to-frame scale.
    pub fit_margin: f64,

    /// Suggested file name for downloads.
    pub export_file_name: String,

    /// How long a popup notice stays visible.
    pub notice_duration: Duration,

    pub theme: ThemeChoice,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            frame_width: 900,
            frame_height: 600,
            fit_margin: 0.95,

            export_file_name: "filtered-image.png".to_string(),

            notice_duration: Duration::from_secs(4),

            theme: ThemeChoice::System,
        }
    }
}
