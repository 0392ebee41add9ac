//! Period day cell rendering.
//!
//! A period day is one cell of a calendar grid that may sit at the start,
//! middle or end of a selected range, or carry a quick-action pill. Styling
//! happens in two passes: [`PeriodDay::derive_style`] turns the marking into
//! a [`DerivedStyle`], and [`PeriodDay::compose`] layers that over the base
//! and today/disabled fragments to produce a [`DayCellVisual`] that
//! [`PeriodDay::show`] paints.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::period_style::{
    ContainerFragment, DayStyleSheet, TextFragment, DAY_CONTAINER_SIZE, PILL_RADIUS,
};
use crate::models::day_state::DayState;
use crate::models::marking::{Marking, MarkingKind, MarkingStatus, QuickAction, QuickEdge};
use crate::ui_egui::theme::{DayTheme, QUICK_ACTION_HIGHLIGHT};

/// Invoked with the cell's date on press or long press.
pub type DayCallback = Arc<dyn Fn(NaiveDate) + Send + Sync>;

/// Returns `true` when the given date must be drawn disabled.
pub type DateFilter = Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>;

/// Builds the optional caption drawn under the day number.
pub type SubTextFn = Arc<dyn Fn(NaiveDate, &TextFragment) -> Option<SubText> + Send + Sync>;

/// Small caption drawn under the day number.
#[derive(Debug, Clone, PartialEq)]
pub struct SubText {
    pub text: String,
    pub color: Color32,
    pub size: f32,
}

/// Everything the grid hands to a single day cell.
///
/// Callbacks are compared by identity when deciding whether a cell needs
/// redrawing, so keep the same `Arc` alive across frames.
#[derive(Clone)]
pub struct DayProps<'a> {
    pub date: NaiveDate,
    pub state: DayState,
    pub marking: Option<&'a Marking>,
    /// Text shown as the day number
    pub children: String,
    /// Informational only; mirrors whether the grid found a marking
    pub marking_exists: bool,
    pub on_press: Option<DayCallback>,
    pub on_long_press: Option<DayCallback>,
    /// Overrides `state == Disabled` when supplied
    pub disable_date: Option<DateFilter>,
    pub sub_text: Option<SubTextFn>,
}

impl<'a> DayProps<'a> {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            state: DayState::Empty,
            marking: None,
            children: date.day().to_string(),
            marking_exists: false,
            on_press: None,
            on_long_press: None,
            disable_date: None,
            sub_text: None,
        }
    }

    pub fn with_state(mut self, state: DayState) -> Self {
        self.state = state;
        self
    }

    pub fn with_marking(mut self, marking: Option<&'a Marking>) -> Self {
        self.marking = marking;
        self.marking_exists = marking.is_some();
        self
    }

    pub fn with_children(mut self, children: impl Into<String>) -> Self {
        self.children = children.into();
        self
    }

    pub fn with_on_press(mut self, callback: DayCallback) -> Self {
        self.on_press = Some(callback);
        self
    }

    pub fn with_on_long_press(mut self, callback: DayCallback) -> Self {
        self.on_long_press = Some(callback);
        self
    }

    pub fn with_disable_date(mut self, filter: DateFilter) -> Self {
        self.disable_date = Some(filter);
        self
    }

    pub fn with_sub_text(mut self, renderer: SubTextFn) -> Self {
        self.sub_text = Some(renderer);
        self
    }

    /// Disabled state, letting `disable_date` win over the static state.
    pub fn is_disabled(&self) -> bool {
        match &self.disable_date {
            Some(filter) => filter(self.date),
            None => self.state == DayState::Disabled,
        }
    }
}

/// Color recorded for a range start or a mid-range day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeMarker {
    pub color: Option<Color32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndingMarker {
    pub color: Option<Color32>,
    pub ending_text: Option<String>,
}

/// Style fragments derived from a marking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedStyle {
    pub text: TextFragment,
    pub container: Option<ContainerFragment>,
    pub left_filler: Option<Color32>,
    pub right_filler: Option<Color32>,
    pub starting_day: Option<RangeMarker>,
    pub ending_day: Option<EndingMarker>,
    pub day: Option<RangeMarker>,
}

impl DerivedStyle {
    pub fn ending_text(&self) -> Option<&str> {
        self.ending_day.as_ref()?.ending_text.as_deref()
    }
}

/// Colors of the horizontal band drawn behind a marked container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillerVisual {
    pub height: f32,
    /// Full-width bar under both halves (mid-range days)
    pub bar: Option<Color32>,
    pub left: Option<Color32>,
    pub right: Option<Color32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayLabel {
    /// Closing caption of a range, drawn instead of the number
    EndingText(String),
    DayNumber {
        text: String,
        sub_text: Option<SubText>,
    },
}

/// Fully resolved drawing instructions for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCellVisual {
    pub container: ContainerFragment,
    pub text: TextFragment,
    pub fillers: Option<FillerVisual>,
    pub label: DayLabel,
}

impl DayCellVisual {
    /// The string drawn in the container.
    pub fn label_text(&self) -> &str {
        match &self.label {
            DayLabel::EndingText(text) => text,
            DayLabel::DayNumber { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCellEvent {
    Pressed(NaiveDate),
    LongPressed(NaiveDate),
}

pub struct DayCellResponse {
    pub response: egui::Response,
    pub event: Option<DayCellEvent>,
}

/// Renders period day cells for one theme.
///
/// The theme is fixed for the lifetime of the value; build a new one (and
/// clear any [`super::update_gate::DayCellMemo`]) when it changes.
#[derive(Debug, Clone)]
pub struct PeriodDay {
    theme: DayTheme,
    sheet: DayStyleSheet,
}

impl PeriodDay {
    pub fn new(theme: DayTheme) -> Self {
        let sheet = DayStyleSheet::from_theme(&theme);
        Self { theme, sheet }
    }

    pub fn theme(&self) -> &DayTheme {
        &self.theme
    }

    pub fn sheet(&self) -> &DayStyleSheet {
        &self.sheet
    }

    /// Map a marking to style fragments.
    ///
    /// Quick actions take precedence over range styling, and an explicit
    /// `text_color` beats every other text color.
    pub fn derive_style(&self, marking: Option<&Marking>) -> DerivedStyle {
        let mut style = DerivedStyle::default();
        let Some(marking) = marking else {
            return style;
        };

        if marking.disabled {
            style.text.color = Some(self.theme.text_disabled);
        } else if marking.selected {
            style.text.color = Some(self.theme.selected_day_text);
        }

        let color = marking.color;
        match &marking.kind {
            MarkingKind::QuickAction(action) => {
                self.apply_quick_action(&mut style, *action);
                return style;
            }
            MarkingKind::RangeStart => {
                style.starting_day = Some(RangeMarker { color });
            }
            MarkingKind::RangeEnd { ending_text } => {
                style.ending_day = Some(EndingMarker {
                    color,
                    ending_text: ending_text.clone(),
                });
            }
            MarkingKind::SingleDayRange { ending_text } => {
                style.starting_day = Some(RangeMarker { color });
                style.ending_day = Some(EndingMarker {
                    color,
                    ending_text: ending_text.clone(),
                });
            }
            MarkingKind::Day => {
                style.day = Some(RangeMarker { color });
            }
        }

        if marking.status == MarkingStatus::NotAvailable {
            style.text = self.sheet.na_text;
        }
        if let Some(text_color) = marking.text_color {
            style.text.color = Some(text_color);
        }

        style
    }

    fn apply_quick_action(&self, style: &mut DerivedStyle, action: QuickAction) {
        match action {
            QuickAction::Edge { edge, end_selected } => {
                style.container = Some(self.sheet.first_quick_action);
                style.text = self.sheet.first_quick_action_text;
                if end_selected {
                    match edge {
                        QuickEdge::First => style.right_filler = Some(QUICK_ACTION_HIGHLIGHT),
                        QuickEdge::Last => style.left_filler = Some(QUICK_ACTION_HIGHLIGHT),
                        QuickEdge::Both => {}
                    }
                }
            }
            QuickAction::Pill => {
                style.container = Some(self.sheet.quick_action);
                style.text = self.sheet.quick_action_text;
            }
            QuickAction::Bridge => {
                style.left_filler = Some(QUICK_ACTION_HIGHLIGHT);
                style.right_filler = Some(QUICK_ACTION_HIGHLIGHT);
            }
        }
    }

    /// Resolve the drawing instructions for a cell.
    pub fn compose(&self, props: &DayProps<'_>, derived: &DerivedStyle) -> DayCellVisual {
        let mut container = self.sheet.base;
        let mut text = self.sheet.text;

        if props.is_disabled() {
            text.layer(&self.sheet.disabled_text);
        } else if props.state == DayState::Today {
            container.layer(&self.sheet.today);
            text.layer(&self.sheet.today_text);
        }

        let mut fillers = None;
        if props.marking.is_some() {
            container.radius = Some(PILL_RADIUS);
            text.layer(&derived.text);
            if let Some(marked) = &derived.container {
                container.layer(marked);
            }
            fillers = Some(self.resolve_fillers(derived, &mut container));
        }

        let label = match derived.ending_text() {
            Some(ending) => DayLabel::EndingText(ending.to_string()),
            None => DayLabel::DayNumber {
                text: props.children.clone(),
                sub_text: props
                    .sub_text
                    .as_ref()
                    .and_then(|render| render(props.date, &text)),
            },
        };

        DayCellVisual {
            container,
            text,
            fillers,
            label,
        }
    }

    // A lone range start is drawn as a detached circle and a single-day range
    // opens to the right; keep this mapping as is.
    fn resolve_fillers(
        &self,
        derived: &DerivedStyle,
        container: &mut ContainerFragment,
    ) -> FillerVisual {
        let background = Some(self.theme.calendar_background);
        let mut filler = FillerVisual {
            height: self.sheet.fillers.height.unwrap_or(DAY_CONTAINER_SIZE.y),
            bar: self.sheet.fillers.background,
            left: derived.left_filler.or(self.sheet.left_filler.background),
            right: derived.right_filler.or(self.sheet.right_filler.background),
        };

        match (&derived.starting_day, &derived.ending_day, &derived.day) {
            (Some(start), None, _) => {
                filler.left = background;
                filler.right = background;
                container.background = start.color;
            }
            (None, Some(end), _) => {
                filler.left = end.color;
                filler.right = background;
                container.background = end.color;
            }
            (None, None, Some(day)) => {
                filler.left = day.color;
                filler.right = day.color;
                filler.bar = day.color;
            }
            (Some(start), Some(_), _) => {
                filler.left = background;
                filler.right = start.color;
                container.background = start.color;
            }
            (None, None, None) => {}
        }

        filler
    }

    /// Draw the cell and report press / long-press.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        props: &DayProps<'_>,
        derived: &DerivedStyle,
        width: f32,
    ) -> DayCellResponse {
        let visual = self.compose(props, derived);
        let size = visual.container.size.unwrap_or(DAY_CONTAINER_SIZE);
        let desired_size = Vec2::new(width.max(size.x), size.y);
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

        if ui.is_rect_visible(rect) {
            self.paint(ui.painter(), rect, &visual);
        }

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        // Right-click stands in for a long press on desktop
        let event = if response.long_touched() || response.secondary_clicked() {
            if let Some(callback) = &props.on_long_press {
                callback(props.date);
            }
            Some(DayCellEvent::LongPressed(props.date))
        } else if response.clicked() {
            if let Some(callback) = &props.on_press {
                callback(props.date);
            }
            Some(DayCellEvent::Pressed(props.date))
        } else {
            None
        };

        DayCellResponse { response, event }
    }

    fn paint(&self, painter: &Painter, rect: Rect, visual: &DayCellVisual) {
        if let Some(fillers) = &visual.fillers {
            let band = Rect::from_center_size(rect.center(), Vec2::new(rect.width(), fillers.height));
            if let Some(bar) = fillers.bar {
                painter.rect_filled(band, 0.0, bar);
            }
            let center_x = band.center().x;
            let left = Rect::from_min_max(band.min, Pos2::new(center_x, band.max.y));
            let right = Rect::from_min_max(Pos2::new(center_x, band.min.y), band.max);
            if let Some(color) = fillers.left {
                painter.rect_filled(left, 0.0, color);
            }
            if let Some(color) = fillers.right {
                painter.rect_filled(right, 0.0, color);
            }
        }

        let size = visual.container.size.unwrap_or(DAY_CONTAINER_SIZE);
        let container_rect = Rect::from_center_size(rect.center(), size);
        let rounding = visual
            .container
            .radius
            .unwrap_or(0.0)
            .min(size.x.min(size.y) / 2.0);
        if let Some(background) = visual.container.background {
            painter.rect_filled(container_rect, rounding, background);
        }
        if let Some(border) = visual.container.border {
            painter.rect_stroke(container_rect, rounding, border);
        }

        let color = visual.text.color.unwrap_or(self.theme.day_text);
        let font = self.label_font(&visual.text);

        match &visual.label {
            DayLabel::EndingText(ending) => {
                self.paint_text(painter, container_rect.center(), ending, font, color, &visual.text);
            }
            DayLabel::DayNumber { text, sub_text } => {
                let Some(sub) = sub_text else {
                    self.paint_text(painter, container_rect.center(), text, font, color, &visual.text);
                    return;
                };
                let number_pos = container_rect.center() - Vec2::new(0.0, sub.size * 0.5);
                let number_rect =
                    self.paint_text(painter, number_pos, text, font, color, &visual.text);
                painter.text(
                    Pos2::new(container_rect.center().x, number_rect.bottom()),
                    Align2::CENTER_TOP,
                    &sub.text,
                    FontId::proportional(sub.size),
                    sub.color,
                );
            }
        }
    }

    /// Ending text and day number share one font.
    fn label_font(&self, text: &TextFragment) -> FontId {
        FontId::proportional(text.size.unwrap_or(self.theme.text_day_font_size))
    }

    fn paint_text(
        &self,
        painter: &Painter,
        pos: Pos2,
        text: &str,
        font: FontId,
        color: Color32,
        style: &TextFragment,
    ) -> Rect {
        let text_rect = painter.text(pos, Align2::CENTER_CENTER, text, font.clone(), color);
        if style.strong.unwrap_or(false) {
            // No bold face in the default fonts; overdraw for weight
            painter.text(pos + Vec2::new(0.6, 0.0), Align2::CENTER_CENTER, text, font, color);
        }
        if style.strikethrough.unwrap_or(false) {
            let y = text_rect.center().y;
            painter.line_segment(
                [Pos2::new(text_rect.left(), y), Pos2::new(text_rect.right(), y)],
                Stroke::new(1.0, color),
            );
        }
        text_rect
    }
}
