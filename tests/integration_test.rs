// Integration tests for marked-dates loading, settings and day cell styling
mod fixtures;

use std::sync::Arc;

use chrono::NaiveDate;
use egui::Color32;
use fixtures::{dates, markings, PERIOD_COLOR};
use period_calendar::models::day_state::DayState;
use period_calendar::models::settings::Settings;
use period_calendar::services::markings::{load_markings, parse_markings, period_markings};
use period_calendar::services::settings::SettingsService;
use period_calendar::ui_egui::theme::{DayTheme, ThemeMode, QUICK_ACTION_HIGHLIGHT};
use period_calendar::ui_egui::views::{DayCellMemo, DayLabel, DayProps, PeriodDay};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_marked_dates_file_renders_period() {
    let cell = PeriodDay::new(DayTheme::light());
    let marked = parse_markings(markings::THREE_DAY_PERIOD_JSON).expect("Failed to parse markings");
    let background = Some(cell.theme().calendar_background);

    let visuals: Vec<_> = marked
        .iter()
        .map(|(date, marking)| {
            let props = DayProps::new(*date).with_marking(Some(marking));
            cell.compose(&props, &cell.derive_style(Some(marking)))
        })
        .collect();

    // Start: detached circle with the explicit text color
    let start = visuals[0].fillers.unwrap();
    assert_eq!((start.left, start.right), (background, background));
    assert_eq!(visuals[0].container.background, Some(PERIOD_COLOR));
    assert_eq!(visuals[0].text.color, Some(Color32::WHITE));

    // Middle: continuous bar
    let middle = visuals[1].fillers.unwrap();
    assert_eq!(middle.bar, Some(PERIOD_COLOR));

    // End: connected on the left, caption instead of the number
    let end = visuals[2].fillers.unwrap();
    assert_eq!((end.left, end.right), (Some(PERIOD_COLOR), background));
    assert_eq!(visuals[2].label, DayLabel::EndingText("Done".to_string()));
}

#[test]
fn test_quick_action_first_with_end_selected() {
    let cell = PeriodDay::new(DayTheme::dark());
    let marking = markings::quick_action(true, false, true);
    let style = cell.derive_style(Some(&marking));
    assert_eq!(style.right_filler, Some(QUICK_ACTION_HIGHLIGHT));
    assert_eq!(style.left_filler, None);
}

#[test]
fn test_disable_date_forces_disabled_text() {
    let cell = PeriodDay::new(DayTheme::light());
    let props = DayProps::new(dates::leap_day_2024())
        .with_state(DayState::Selected)
        .with_disable_date(Arc::new(|date: NaiveDate| date == dates::leap_day_2024()));
    let visual = cell.compose(&props, &cell.derive_style(None));
    assert_eq!(visual.text.color, Some(cell.theme().text_disabled));
    assert_eq!(visual.label_text(), "29");
}

#[test]
fn test_gate_over_a_period_grid() {
    let cell = PeriodDay::new(DayTheme::light());
    let mut memo = DayCellMemo::new();
    let first = period_markings(dates::period_start(), dates::period_end(), PERIOD_COLOR);

    for (date, marking) in &first {
        assert!(memo.should_update(&cell, &DayProps::new(*date).with_marking(Some(marking))));
    }
    for (date, marking) in &first {
        assert!(!memo.should_update(&cell, &DayProps::new(*date).with_marking(Some(marking))));
    }

    // Shrinking the period by one day touches only the last two cells
    let shorter = period_markings(
        dates::period_start(),
        dates::period_end().pred_opt().unwrap(),
        PERIOD_COLOR,
    );
    let changed: Vec<NaiveDate> = first
        .keys()
        .filter(|date| {
            let props = DayProps::new(**date).with_marking(shorter.get(*date));
            memo.should_update(&cell, &props)
        })
        .copied()
        .collect();
    assert_eq!(
        changed,
        vec![dates::period_end().pred_opt().unwrap(), dates::period_end()]
    );
}

#[test]
fn test_settings_and_markings_from_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let markings_path = dir.path().join("marked.json");
    std::fs::write(&markings_path, markings::THREE_DAY_PERIOD_JSON).unwrap();

    let service = SettingsService::new(dir.path().join("settings.toml"));
    let settings = Settings {
        theme: ThemeMode::Dark,
        markings: Some(markings_path.clone()),
        ..Default::default()
    };
    service.update(&settings).expect("Failed to save settings");

    // Simulate the next launch
    let loaded = SettingsService::new(dir.path().join("settings.toml"))
        .get()
        .expect("Failed to load settings");
    assert_eq!(loaded, settings);
    assert!(loaded.day_theme().is_dark);

    let marked = load_markings(loaded.markings.as_deref().unwrap()).expect("Failed to load markings");
    assert_eq!(marked.len(), 3);
    assert_eq!(
        marked[&dates::period_start()],
        period_calendar::models::marking::Marking::range_start(PERIOD_COLOR)
            .with_text_color(Color32::WHITE)
    );
}

#[test]
fn test_missing_markings_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_markings(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read marked dates"));
}

#[test]
fn test_ending_text_fixture() {
    let cell = PeriodDay::new(DayTheme::light());
    let marking = markings::range_end_with_text("Back");
    let props = DayProps::new(dates::period_end()).with_marking(Some(&marking));
    let visual = cell.compose(&props, &cell.derive_style(Some(&marking)));
    assert_eq!(visual.label_text(), "Back");
}
