//! Theme module for period day cells
//!
//! Defines the DayTheme palette, the optional overrides users can supply in
//! their settings file, and the merge of the two.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::utils::color::HexColor;

/// Fill used for quick-action runs whose end has been selected.
pub const QUICK_ACTION_HIGHLIGHT: Color32 = Color32::from_rgb(0xc1, 0xe4, 0xfe);

/// Colors and sizes used to draw period day cells
#[derive(Debug, Clone, PartialEq)]
pub struct DayTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Calendar grid background; also used to detach range pills
    pub calendar_background: Color32,

    /// Regular day number color
    pub day_text: Color32,

    /// Day number color for disabled days
    pub text_disabled: Color32,

    /// Day number color for selected days
    pub selected_day_text: Color32,

    /// Background of the first/last quick-action pill
    pub selected_day_background: Color32,

    /// Today's container background
    pub today_background: Color32,

    /// Today's day number color
    pub today_text: Color32,

    /// Day number color for unavailable days
    pub not_available_text: Color32,

    /// Border and text color of standalone quick-action pills
    pub quick_action_accent: Color32,

    /// Font size of the day number
    pub text_day_font_size: f32,
}

impl DayTheme {
    /// Create the default Light theme
    pub fn light() -> Self {
        Self {
            is_dark: false,
            calendar_background: Color32::from_rgb(255, 255, 255),
            day_text: Color32::from_rgb(0x2d, 0x41, 0x50),
            text_disabled: Color32::from_rgb(0xd9, 0xe1, 0xe8),
            selected_day_text: Color32::from_rgb(255, 255, 255),
            selected_day_background: Color32::from_rgb(0x00, 0xad, 0xf5),
            today_background: Color32::from_rgb(230, 240, 255),
            today_text: Color32::from_rgb(0x00, 0xad, 0xf5),
            not_available_text: Color32::from_rgb(0xbf, 0xbf, 0xbf),
            quick_action_accent: Color32::from_rgb(0x00, 0xad, 0xf5),
            text_day_font_size: 16.0,
        }
    }

    /// Create the default Dark theme
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            calendar_background: Color32::from_rgb(40, 40, 40),
            day_text: Color32::from_rgb(240, 240, 240),
            text_disabled: Color32::from_rgb(90, 90, 90),
            selected_day_text: Color32::from_rgb(255, 255, 255),
            selected_day_background: Color32::from_rgb(0x00, 0x8c, 0xc8),
            today_background: Color32::from_rgb(50, 60, 80),
            today_text: Color32::from_rgb(100, 150, 255),
            not_available_text: Color32::from_rgb(120, 120, 120),
            quick_action_accent: Color32::from_rgb(100, 150, 255),
            text_day_font_size: 16.0,
        }
    }

    /// Layer user overrides on top of this theme.
    pub fn merged(mut self, overrides: &ThemeOverrides) -> Self {
        let apply = |slot: &mut Color32, value: Option<HexColor>| {
            if let Some(color) = value {
                *slot = color.0;
            }
        };

        apply(&mut self.calendar_background, overrides.calendar_background);
        apply(&mut self.day_text, overrides.day_text);
        apply(&mut self.text_disabled, overrides.text_disabled);
        apply(&mut self.selected_day_text, overrides.selected_day_text);
        apply(&mut self.selected_day_background, overrides.selected_day_background);
        apply(&mut self.today_background, overrides.today_background);
        apply(&mut self.today_text, overrides.today_text);
        apply(&mut self.not_available_text, overrides.not_available_text);
        apply(&mut self.quick_action_accent, overrides.quick_action_accent);

        if let Some(size) = overrides.text_day_font_size {
            if size > 0.0 {
                self.text_day_font_size = size;
            } else {
                log::warn!("Ignoring non-positive day font size {}", size);
            }
        }

        self
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.calendar_background;
        visuals.panel_fill = self.calendar_background;
        visuals.override_text_color = Some(self.day_text);

        ctx.set_visuals(visuals);
    }
}

impl Default for DayTheme {
    fn default() -> Self {
        Self::light()
    }
}

/// Optional per-field overrides, read from the `[overrides]` settings table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_background: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_text: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_disabled: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_day_text: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_day_background: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_background: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_text: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_available_text: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_action_accent: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_day_font_size: Option<f32>,
}

/// Which preset a theme starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Follow the operating system preference
    System,
}

impl ThemeMode {
    /// Resolve to a concrete preset, asking the OS when set to `System`.
    pub fn resolve(self) -> DayTheme {
        match self {
            ThemeMode::Light => DayTheme::light(),
            ThemeMode::Dark => DayTheme::dark(),
            ThemeMode::System => match dark_light::detect() {
                dark_light::Mode::Dark => DayTheme::dark(),
                dark_light::Mode::Light => DayTheme::light(),
                dark_light::Mode::Default => {
                    log::debug!("System theme unknown, using light");
                    DayTheme::light()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_theme() {
        let theme = DayTheme::light();
        assert!(!theme.is_dark);
        assert_eq!(theme.calendar_background, Color32::WHITE);
    }

    #[test]
    fn test_dark_theme() {
        let theme = DayTheme::dark();
        assert!(theme.is_dark);
        assert_eq!(theme.calendar_background, Color32::from_rgb(40, 40, 40));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let overrides = ThemeOverrides {
            calendar_background: Some(HexColor(Color32::BLACK)),
            ..Default::default()
        };
        let merged = DayTheme::light().merged(&overrides);
        assert_eq!(merged.calendar_background, Color32::BLACK);
        assert_eq!(merged.day_text, DayTheme::light().day_text);
    }

    #[test]
    fn test_merge_rejects_bad_font_size() {
        let overrides = ThemeOverrides {
            text_day_font_size: Some(0.0),
            ..Default::default()
        };
        assert_eq!(DayTheme::light().merged(&overrides).text_day_font_size, 16.0);
    }

    #[test]
    fn test_overrides_from_toml() {
        let overrides: ThemeOverrides = toml::from_str(
            "text_disabled = \"#cccccc\"\ntext_day_font_size = 14.0\n",
        )
        .unwrap();
        assert_eq!(overrides.text_disabled, Some(HexColor(Color32::from_gray(0xcc))));
        assert_eq!(overrides.text_day_font_size, Some(14.0));
        assert_eq!(overrides.day_text, None);
    }

    #[test]
    fn test_fixed_modes_resolve() {
        assert_eq!(ThemeMode::Light.resolve(), DayTheme::light());
        assert_eq!(ThemeMode::Dark.resolve(), DayTheme::dark());
    }
}
