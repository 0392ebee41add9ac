//! Marking model for period day cells.
//!
//! A marking describes how a single day participates in a selected period:
//! the start, the middle or the end of a range, or one of the quick-action
//! pill shapes. Markings arrive in a flat, camelCase wire form
//! ([`MarkingSpec`]) and are classified into a closed [`MarkingKind`] so the
//! styling code can match on them exhaustively.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::utils::color::{self, HexColor};

/// Availability status attached to a marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkingStatus {
    NotAvailable,
    #[default]
    #[serde(other)]
    Available,
}

/// Which end of a quick-action run a cell sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickEdge {
    First,
    Last,
    /// The run is a single day: first and last at once.
    Both,
}

/// Quick-action pill shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    /// Standalone pill, end not selected yet.
    Pill,
    /// Interior of a quick-action run whose end has been selected.
    Bridge,
    /// First and/or last cell of a quick-action run.
    Edge { edge: QuickEdge, end_selected: bool },
}

/// The shape a marked day takes inside a period.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkingKind {
    /// Mid-range day: the bar runs straight through the cell.
    Day,
    RangeStart,
    RangeEnd { ending_text: Option<String> },
    /// A period that starts and ends on the same day.
    SingleDayRange { ending_text: Option<String> },
    QuickAction(QuickAction),
}

/// A classified marking for one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marking {
    pub disabled: bool,
    pub selected: bool,
    pub status: MarkingStatus,
    pub color: Option<Color32>,
    pub text_color: Option<Color32>,
    pub kind: MarkingKind,
}

impl Marking {
    /// Mid-range marking in the given color.
    pub fn day(color: Color32) -> Self {
        Self::with_kind(MarkingKind::Day, Some(color))
    }

    pub fn range_start(color: Color32) -> Self {
        Self::with_kind(MarkingKind::RangeStart, Some(color))
    }

    pub fn range_end(color: Color32) -> Self {
        Self::with_kind(MarkingKind::RangeEnd { ending_text: None }, Some(color))
    }

    pub fn single_day(color: Color32) -> Self {
        Self::with_kind(MarkingKind::SingleDayRange { ending_text: None }, Some(color))
    }

    pub fn quick_action(action: QuickAction) -> Self {
        Self::with_kind(MarkingKind::QuickAction(action), None)
    }

    fn with_kind(kind: MarkingKind, color: Option<Color32>) -> Self {
        Self {
            disabled: false,
            selected: false,
            status: MarkingStatus::Available,
            color,
            text_color: None,
            kind,
        }
    }

    /// Attach a closing caption; only range ends can carry one.
    pub fn with_ending_text(mut self, text: impl Into<String>) -> Self {
        match &mut self.kind {
            MarkingKind::RangeEnd { ending_text } | MarkingKind::SingleDayRange { ending_text } => {
                *ending_text = Some(text.into());
            }
            _ => log::warn!("Ending text ignored on a marking that does not end a range"),
        }
        self
    }

    pub fn with_text_color(mut self, color: Color32) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_status(mut self, status: MarkingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn is_quick_action(&self) -> bool {
        matches!(self.kind, MarkingKind::QuickAction(_))
    }

    /// Closing caption shown instead of the day number, if any.
    pub fn ending_text(&self) -> Option<&str> {
        match &self.kind {
            MarkingKind::RangeEnd { ending_text } | MarkingKind::SingleDayRange { ending_text } => {
                ending_text.as_deref()
            }
            _ => None,
        }
    }
}

/// Flat wire form of a marking, as found in marked-dates JSON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkingSpec {
    pub disabled: bool,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MarkingStatus>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "color::deserialize_lenient"
    )]
    pub color: Option<HexColor>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "color::deserialize_lenient"
    )]
    pub text_color: Option<HexColor>,
    pub starting_day: bool,
    pub ending_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_day_text: Option<String>,
    pub quick_action: bool,
    pub first: bool,
    pub last: bool,
    pub end_selected: bool,
}

impl MarkingSpec {
    fn kind(&self) -> MarkingKind {
        if self.quick_action {
            let action = match (self.first, self.last) {
                (true, true) => QuickAction::Edge {
                    edge: QuickEdge::Both,
                    end_selected: self.end_selected,
                },
                (true, false) => QuickAction::Edge {
                    edge: QuickEdge::First,
                    end_selected: self.end_selected,
                },
                (false, true) => QuickAction::Edge {
                    edge: QuickEdge::Last,
                    end_selected: self.end_selected,
                },
                (false, false) if self.end_selected => QuickAction::Bridge,
                (false, false) => QuickAction::Pill,
            };
            return MarkingKind::QuickAction(action);
        }

        // Ending text is only meaningful on a day that closes the range.
        let ending_text = self.ending_day_text.clone().filter(|text| !text.is_empty());
        match (self.starting_day, self.ending_day) {
            (true, true) => MarkingKind::SingleDayRange { ending_text },
            (true, false) => MarkingKind::RangeStart,
            (false, true) => MarkingKind::RangeEnd { ending_text },
            (false, false) => MarkingKind::Day,
        }
    }
}

impl From<MarkingSpec> for Marking {
    fn from(spec: MarkingSpec) -> Self {
        Self {
            disabled: spec.disabled,
            selected: spec.selected,
            status: spec.status.unwrap_or_default(),
            color: spec.color.map(Color32::from),
            text_color: spec.text_color.map(Color32::from),
            kind: spec.kind(),
        }
    }
}

impl From<&Marking> for MarkingSpec {
    fn from(marking: &Marking) -> Self {
        let mut spec = MarkingSpec {
            disabled: marking.disabled,
            selected: marking.selected,
            status: (marking.status != MarkingStatus::Available).then_some(marking.status),
            color: marking.color.map(HexColor),
            text_color: marking.text_color.map(HexColor),
            ..Default::default()
        };

        match &marking.kind {
            MarkingKind::Day => {}
            MarkingKind::RangeStart => spec.starting_day = true,
            MarkingKind::RangeEnd { ending_text } => {
                spec.ending_day = true;
                spec.ending_day_text = ending_text.clone();
            }
            MarkingKind::SingleDayRange { ending_text } => {
                spec.starting_day = true;
                spec.ending_day = true;
                spec.ending_day_text = ending_text.clone();
            }
            MarkingKind::QuickAction(action) => {
                spec.quick_action = true;
                match *action {
                    QuickAction::Pill => {}
                    QuickAction::Bridge => spec.end_selected = true,
                    QuickAction::Edge { edge, end_selected } => {
                        spec.end_selected = end_selected;
                        spec.first = matches!(edge, QuickEdge::First | QuickEdge::Both);
                        spec.last = matches!(edge, QuickEdge::Last | QuickEdge::Both);
                    }
                }
            }
        }

        spec
    }
}
