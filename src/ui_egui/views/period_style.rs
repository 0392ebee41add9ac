//! Style fragments for period day cells.
//!
//! Fragments are partial styles: every field is optional and layering one
//! fragment over another only replaces the fields the top one sets.

use crate::ui_egui::theme::DayTheme;
use egui::{Color32, Stroke, Vec2};

/// Width and height of the day container.
pub const DAY_CONTAINER_SIZE: Vec2 = Vec2::new(38.0, 34.0);

/// Corner radius that turns a marked container into a pill.
pub const PILL_RADIUS: f32 = 22.0;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextFragment {
    pub color: Option<Color32>,
    pub size: Option<f32>,
    pub strong: Option<bool>,
    pub strikethrough: Option<bool>,
}

impl TextFragment {
    pub fn colored(color: Color32) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn layer(&mut self, top: &TextFragment) {
        self.color = top.color.or(self.color);
        self.size = top.size.or(self.size);
        self.strong = top.strong.or(self.strong);
        self.strikethrough = top.strikethrough.or(self.strikethrough);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContainerFragment {
    pub size: Option<Vec2>,
    pub background: Option<Color32>,
    pub border: Option<Stroke>,
    pub radius: Option<f32>,
}

impl ContainerFragment {
    pub fn layer(&mut self, top: &ContainerFragment) {
        self.size = top.size.or(self.size);
        self.background = top.background.or(self.background);
        self.border = top.border.or(self.border);
        self.radius = top.radius.or(self.radius);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FillerFragment {
    pub height: Option<f32>,
    pub background: Option<Color32>,
}

/// Named fragments built once per theme.
#[derive(Debug, Clone, PartialEq)]
pub struct DayStyleSheet {
    pub base: ContainerFragment,
    pub text: TextFragment,
    pub today: ContainerFragment,
    pub today_text: TextFragment,
    pub disabled_text: TextFragment,
    pub na_text: TextFragment,
    pub fillers: FillerFragment,
    pub left_filler: FillerFragment,
    pub right_filler: FillerFragment,
    pub first_quick_action: ContainerFragment,
    pub first_quick_action_text: TextFragment,
    pub quick_action: ContainerFragment,
    pub quick_action_text: TextFragment,
}

impl DayStyleSheet {
    pub fn from_theme(theme: &DayTheme) -> Self {
        let filler_height = DAY_CONTAINER_SIZE.y;

        Self {
            base: ContainerFragment {
                size: Some(DAY_CONTAINER_SIZE),
                ..Default::default()
            },
            text: TextFragment {
                color: Some(theme.day_text),
                size: Some(theme.text_day_font_size),
                strong: Some(false),
                strikethrough: Some(false),
            },
            today: ContainerFragment {
                background: Some(theme.today_background),
                ..Default::default()
            },
            today_text: TextFragment {
                color: Some(theme.today_text),
                strong: Some(true),
                ..Default::default()
            },
            disabled_text: TextFragment::colored(theme.text_disabled),
            na_text: TextFragment {
                color: Some(theme.not_available_text),
                strikethrough: Some(true),
                ..Default::default()
            },
            fillers: FillerFragment {
                height: Some(filler_height),
                background: None,
            },
            left_filler: FillerFragment {
                height: Some(filler_height),
                background: None,
            },
            right_filler: FillerFragment {
                height: Some(filler_height),
                background: None,
            },
            first_quick_action: ContainerFragment {
                background: Some(theme.selected_day_background),
                radius: Some(PILL_RADIUS),
                ..Default::default()
            },
            first_quick_action_text: TextFragment {
                color: Some(theme.selected_day_text),
                strong: Some(true),
                ..Default::default()
            },
            quick_action: ContainerFragment {
                background: Some(with_alpha(
                    theme.quick_action_accent,
                    if theme.is_dark { 60 } else { 30 },
                )),
                border: Some(Stroke::new(1.0, theme.quick_action_accent)),
                radius: Some(PILL_RADIUS),
                ..Default::default()
            },
            quick_action_text: TextFragment::colored(theme.quick_action_accent),
        }
    }
}
