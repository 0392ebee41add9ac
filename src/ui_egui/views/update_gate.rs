//! Redraw gate for period day cells.
//!
//! The grid owns one [`DayCellMemo`] and asks it, per date and per frame,
//! whether a cell changed since it was last seen. The memo keeps the derived
//! style of every visible cell, so the painter can reuse it instead of
//! deriving it again.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;

use super::period_day_cell::{DayCallback, DayProps, DerivedStyle, PeriodDay};
use crate::models::day_state::DayState;
use crate::models::marking::Marking;

/// Props whose change forces a redraw even when the style is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchedProp {
    State,
    Children,
    Marking,
    OnPress,
    OnLongPress,
}

impl WatchedProp {
    pub const ALL: [WatchedProp; 5] = [
        WatchedProp::State,
        WatchedProp::Children,
        WatchedProp::Marking,
        WatchedProp::OnPress,
        WatchedProp::OnLongPress,
    ];
}

/// Owned copy of the watched props from the previous pass.
#[derive(Clone)]
struct PropSnapshot {
    state: DayState,
    children: String,
    marking: Option<Marking>,
    on_press: Option<DayCallback>,
    on_long_press: Option<DayCallback>,
}

impl PropSnapshot {
    fn capture(props: &DayProps<'_>) -> Self {
        Self {
            state: props.state,
            children: props.children.clone(),
            marking: props.marking.cloned(),
            on_press: props.on_press.clone(),
            on_long_press: props.on_long_press.clone(),
        }
    }

    fn differs(&self, next: &DayProps<'_>, prop: WatchedProp) -> bool {
        match prop {
            WatchedProp::State => self.state != next.state,
            WatchedProp::Children => self.children != next.children,
            WatchedProp::Marking => self.marking.as_ref() != next.marking,
            WatchedProp::OnPress => !same_callback(&self.on_press, &next.on_press),
            WatchedProp::OnLongPress => !same_callback(&self.on_long_press, &next.on_long_press),
        }
    }
}

/// Callbacks are equal when they are the same allocation.
fn same_callback(prev: &Option<DayCallback>, next: &Option<DayCallback>) -> bool {
    match (prev, next) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::eq(
            Arc::as_ptr(a) as *const (),
            Arc::as_ptr(b) as *const (),
        ),
        _ => false,
    }
}

/// First watched prop that differs between the previous pass and `next`.
fn changed_prop(prev: &PropSnapshot, next: &DayProps<'_>) -> Option<WatchedProp> {
    WatchedProp::ALL
        .into_iter()
        .find(|prop| prev.differs(next, *prop))
}

struct MemoEntry {
    style: DerivedStyle,
    previous: PropSnapshot,
}

/// Per-date cache of derived styles and previous props.
#[derive(Default)]
pub struct DayCellMemo {
    entries: HashMap<NaiveDate, MemoEntry>,
}

impl DayCellMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether the cell for `next.date` needs redrawing.
    ///
    /// Always records `next` as the previous props for the following call.
    pub fn should_update(&mut self, cell: &PeriodDay, next: &DayProps<'_>) -> bool {
        let Some(entry) = self.entries.get_mut(&next.date) else {
            self.entries.insert(
                next.date,
                MemoEntry {
                    style: cell.derive_style(next.marking),
                    previous: PropSnapshot::capture(next),
                },
            );
            return true;
        };

        // The theme is fixed for a memo's lifetime, so the style only moves
        // with the marking.
        let mut style_changed = false;
        if entry.previous.marking.as_ref() != next.marking {
            let style = cell.derive_style(next.marking);
            if style != entry.style {
                entry.style = style;
                style_changed = true;
            }
        }

        let changed = if style_changed {
            log::debug!("Day cell {} restyled", next.date);
            true
        } else if let Some(prop) = changed_prop(&entry.previous, next) {
            log::debug!("Day cell {} changed: {:?}", next.date, prop);
            true
        } else {
            false
        };

        entry.previous = PropSnapshot::capture(next);
        changed
    }

    /// Cached derived style for a date, if the gate has seen it.
    pub fn style(&self, date: NaiveDate) -> Option<&DerivedStyle> {
        self.entries.get(&date).map(|entry| &entry.style)
    }

    /// Gate the cell and return the style to draw it with.
    pub fn refresh(&mut self, cell: &PeriodDay, next: &DayProps<'_>) -> (bool, DerivedStyle) {
        let changed = self.should_update(cell, next);
        let style = self
            .style(next.date)
            .cloned()
            .unwrap_or_else(|| cell.derive_style(next.marking));
        (changed, style)
    }

    pub fn forget(&mut self, date: NaiveDate) {
        self.entries.remove(&date);
    }

    /// Drop every date not in `visible`, e.g. after paging to another month.
    pub fn retain(&mut self, visible: &HashSet<NaiveDate>) {
        self.entries.retain(|date, _| visible.contains(date));
    }

    /// Drop all entries; required after swapping the theme.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
