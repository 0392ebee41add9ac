// Settings module

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ui_egui::theme::{DayTheme, ThemeMode, ThemeOverrides};

/// User settings, stored as `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeMode,
    /// Marked-dates JSON file shown on startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markings: Option<PathBuf>,
    pub overrides: ThemeOverrides,
}

impl Settings {
    /// Resolve the preset and layer the overrides on top.
    pub fn day_theme(&self) -> DayTheme {
        self.theme.resolve().merged(&self.overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, ThemeMode::Light);
        assert!(settings.markings.is_none());
        assert_eq!(settings.day_theme(), DayTheme::light());
    }

    #[test]
    fn test_parse_full_settings() {
        let settings: Settings = toml::from_str(
            r##"
theme = "dark"
markings = "/tmp/marked.json"

[overrides]
calendar_background = "#000000"
"##,
        )
        .unwrap();
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.markings, Some(PathBuf::from("/tmp/marked.json")));

        let theme = settings.day_theme();
        assert!(theme.is_dark);
        assert_eq!(theme.calendar_background, Color32::BLACK);
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(toml::from_str::<Settings>("theme = \"sepia\"").is_err());
    }
}
