use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Datelike, Duration, Local, NaiveDate};
use egui::Color32;

use crate::models::day_state::DayState;
use crate::models::settings::Settings;
use crate::services::markings::{period_markings, save_markings, MarkedDates};
use crate::ui_egui::theme::DayTheme;
use crate::ui_egui::views::{
    DateFilter, DayCallback, DayCellEvent, DayCellMemo, DayProps, PeriodDay, SubText, SubTextFn,
    TextFragment,
};

/// Weeks shown in the preview.
const PREVIEW_WEEKS: i64 = 3;
const MIN_CELL_WIDTH: f32 = 44.0;
const DEFAULT_PERIOD_COLOR: Color32 = Color32::from_rgb(0x50, 0xce, 0xbb);

/// Preview window: a few weeks of period day cells and a range picker.
pub struct PeriodPreviewApp {
    cell: PeriodDay,
    memo: DayCellMemo,
    markings: MarkedDates,
    markings_path: Option<PathBuf>,
    today: NaiveDate,
    /// First click of a range that is still being picked
    pending_start: Option<NaiveDate>,
    on_press: DayCallback,
    on_long_press: DayCallback,
    disable_date: DateFilter,
    sub_text: SubTextFn,
    status: Option<String>,
}

impl PeriodPreviewApp {
    pub fn new(settings: &Settings, markings: MarkedDates) -> Self {
        let today = Local::now().date_naive();
        let theme = settings.day_theme();

        Self {
            cell: PeriodDay::new(theme),
            memo: DayCellMemo::new(),
            markings,
            markings_path: settings.markings.clone(),
            today,
            pending_start: None,
            on_press: Arc::new(|date: NaiveDate| log::trace!("Pressed {}", date)),
            on_long_press: Arc::new(|date: NaiveDate| log::trace!("Long-pressed {}", date)),
            // Past days cannot start a new period
            disable_date: Arc::new(move |date: NaiveDate| date < today),
            sub_text: Arc::new(move |date: NaiveDate, text: &TextFragment| {
                (date == today).then(|| SubText {
                    text: "today".to_string(),
                    color: text.color.unwrap_or(Color32::GRAY),
                    size: 8.0,
                })
            }),
            status: None,
        }
    }

    /// Swap the theme; cached styles belong to the old one.
    pub fn set_theme(&mut self, theme: DayTheme) {
        self.cell = PeriodDay::new(theme);
        self.memo.clear();
    }

    fn visible_days(&self) -> Vec<NaiveDate> {
        let anchor = self
            .markings
            .keys()
            .next()
            .copied()
            .unwrap_or(self.today)
            .min(self.today);
        let monday = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);

        monday
            .iter_days()
            .take((PREVIEW_WEEKS * 7) as usize)
            .collect()
    }

    fn handle_event(&mut self, event: DayCellEvent) {
        match event {
            DayCellEvent::Pressed(date) => match self.pending_start.take() {
                Some(start) => {
                    self.markings = period_markings(start, date, DEFAULT_PERIOD_COLOR);
                    self.status = Some(format!("Selected {} to {}", start.min(date), start.max(date)));
                }
                None => {
                    self.pending_start = Some(date);
                    self.markings = period_markings(date, date, DEFAULT_PERIOD_COLOR);
                    self.status = Some(format!("Start {}, pick an end date", date));
                }
            },
            DayCellEvent::LongPressed(_) => {
                self.pending_start = None;
                self.markings.clear();
                self.status = Some("Selection cleared".to_string());
            }
        }
    }

    fn save(&mut self) {
        let Some(path) = self.markings_path.clone() else {
            return;
        };
        self.status = Some(match save_markings(&path, &self.markings) {
            Ok(()) => format!("Saved to {}", path.display()),
            Err(e) => {
                log::error!("Failed to save marked dates: {:#}", e);
                format!("Save failed: {}", e)
            }
        });
    }

    fn render_grid(&mut self, ui: &mut egui::Ui) -> Option<DayCellEvent> {
        let days = self.visible_days();
        let width = (ui.available_width() / 7.0).max(MIN_CELL_WIDTH);
        let mut event = None;
        let mut redrawn = 0usize;
        let (today, pending_start) = (self.today, self.pending_start);

        ui.spacing_mut().item_spacing = egui::vec2(0.0, 6.0);
        for week in days.chunks(7) {
            ui.horizontal(|ui| {
                for &date in week {
                    let props = DayProps::new(date)
                        .with_state(day_state(date, today, pending_start))
                        .with_marking(self.markings.get(&date))
                        .with_on_press(Arc::clone(&self.on_press))
                        .with_on_long_press(Arc::clone(&self.on_long_press))
                        .with_disable_date(Arc::clone(&self.disable_date))
                        .with_sub_text(Arc::clone(&self.sub_text));

                    let (changed, style) = self.memo.refresh(&self.cell, &props);
                    if changed {
                        redrawn += 1;
                    }

                    let response = self.cell.show(ui, &props, &style, width);
                    if let Some(cell_event) = response.event {
                        event = Some(cell_event);
                    }
                }
            });
        }

        if redrawn > 0 {
            log::debug!("{} of {} day cells changed", redrawn, days.len());
        }
        self.memo.retain(&days.into_iter().collect::<HashSet<_>>());

        event
    }
}

fn day_state(date: NaiveDate, today: NaiveDate, pending_start: Option<NaiveDate>) -> DayState {
    if date == today {
        DayState::Today
    } else if pending_start == Some(date) {
        DayState::Selected
    } else {
        DayState::Empty
    }
}

impl eframe::App for PeriodPreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.cell.theme().apply_to_context(ctx);

        egui::TopBottomPanel::top("period_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Period");
                ui.separator();
                ui.label("Click two days to select a period, right-click to clear");
                if self.markings_path.is_some() && ui.button("Save").clicked() {
                    self.save();
                }
            });
        });

        egui::TopBottomPanel::bottom("period_status").show(ctx, |ui| {
            ui.label(self.status.as_deref().unwrap_or(""));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(event) = self.render_grid(ui) {
                self.handle_event(event);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::marking::MarkingKind;

    fn app() -> PeriodPreviewApp {
        PeriodPreviewApp::new(&Settings::default(), MarkedDates::new())
    }

    #[test]
    fn test_two_presses_select_period() {
        let mut app = app();
        let start = app.today + Duration::days(1);
        let end = start + Duration::days(3);

        app.handle_event(DayCellEvent::Pressed(start));
        assert_eq!(app.pending_start, Some(start));
        assert_eq!(
            app.markings[&start].kind,
            MarkingKind::SingleDayRange { ending_text: None }
        );

        app.handle_event(DayCellEvent::Pressed(end));
        assert_eq!(app.pending_start, None);
        assert_eq!(app.markings.len(), 4);
        assert_eq!(app.markings[&start].kind, MarkingKind::RangeStart);
    }

    #[test]
    fn test_long_press_clears() {
        let mut app = app();
        app.handle_event(DayCellEvent::Pressed(app.today));
        app.handle_event(DayCellEvent::LongPressed(app.today));
        assert!(app.markings.is_empty());
        assert_eq!(app.pending_start, None);
    }

    #[test]
    fn test_visible_days_start_on_monday() {
        let app = app();
        let days = app.visible_days();
        assert_eq!(days.len(), 21);
        assert_eq!(days[0].weekday(), chrono::Weekday::Mon);
        assert!(days.contains(&app.today));
    }

    #[test]
    fn test_today_state() {
        let app = app();
        assert_eq!(day_state(app.today, app.today, None), DayState::Today);
        assert!((app.disable_date)(app.today - Duration::days(1)));
        assert!(!(app.disable_date)(app.today));
    }
}
