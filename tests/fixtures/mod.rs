// Test fixtures - reusable test data
// Provides consistent dates and markings across all test files

#![allow(dead_code)]

use chrono::NaiveDate;
use egui::Color32;
use period_calendar::models::marking::{Marking, MarkingSpec};

/// Teal used by the sample periods
pub const PERIOD_COLOR: Color32 = Color32::from_rgb(0x50, 0xce, 0xbb);

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns Mar 10, 2025
    pub fn period_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    /// Returns Mar 14, 2025
    pub fn period_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample markings for testing
pub mod markings {
    use super::*;

    /// Marked-dates file contents for a three-day period ending in "Done"
    pub const THREE_DAY_PERIOD_JSON: &str = r##"{
        "2025-03-10": {"startingDay": true, "color": "#50cebb", "textColor": "#ffffff"},
        "2025-03-11": {"color": "#50cebb"},
        "2025-03-12": {"endingDay": true, "color": "#50cebb", "endingDayText": "Done"}
    }"##;

    pub fn quick_action(first: bool, last: bool, end_selected: bool) -> Marking {
        MarkingSpec {
            quick_action: true,
            first,
            last,
            end_selected,
            ..Default::default()
        }
        .into()
    }

    pub fn range_end_with_text(text: &str) -> Marking {
        Marking::range_end(PERIOD_COLOR).with_ending_text(text)
    }
}
