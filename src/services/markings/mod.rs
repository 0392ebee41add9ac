//! Marked-dates files and period construction.
//!
//! A marked-dates file is a JSON object keyed by ISO date:
//!
//! ```json
//! {
//!   "2025-03-10": { "startingDay": true, "color": "#50cebb" },
//!   "2025-03-11": { "color": "#70d7c7" },
//!   "2025-03-12": { "endingDay": true, "color": "#50cebb", "endingDayText": "Done" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use egui::Color32;

use crate::models::marking::{Marking, MarkingSpec};

/// At most one marking per day.
pub type MarkedDates = BTreeMap<NaiveDate, Marking>;

pub fn parse_markings(json: &str) -> Result<MarkedDates> {
    let specs: BTreeMap<NaiveDate, MarkingSpec> =
        serde_json::from_str(json).context("Invalid marked-dates JSON")?;
    Ok(specs
        .into_iter()
        .map(|(date, spec)| (date, Marking::from(spec)))
        .collect())
}

pub fn load_markings(path: &Path) -> Result<MarkedDates> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read marked dates from {:?}", path))?;
    let markings =
        parse_markings(&content).with_context(|| format!("Failed to load {:?}", path))?;
    log::info!("Loaded {} marked dates from {:?}", markings.len(), path);
    Ok(markings)
}

pub fn save_markings(path: &Path, markings: &MarkedDates) -> Result<()> {
    let specs: BTreeMap<NaiveDate, MarkingSpec> = markings
        .iter()
        .map(|(date, marking)| (*date, MarkingSpec::from(marking)))
        .collect();
    let json = serde_json::to_string_pretty(&specs).context("Failed to serialize marked dates")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write marked dates to {:?}", path))?;
    Ok(())
}

/// Mark every day from `start` through `end` as one period.
///
/// The bounds may be given in either order. A one-day period is marked as
/// both starting and ending.
pub fn period_markings(start: NaiveDate, end: NaiveDate, color: Color32) -> MarkedDates {
    let (first, last) = if start <= end { (start, end) } else { (end, start) };

    if first == last {
        return BTreeMap::from([(first, Marking::single_day(color))]);
    }

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| {
            let marking = if date == first {
                Marking::range_start(color)
            } else if date == last {
                Marking::range_end(color)
            } else {
                Marking::day(color)
            };
            (date, marking)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::marking::MarkingKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_markings() {
        let markings = parse_markings(
            r##"{
                "2025-03-10": {"startingDay": true, "color": "#50cebb"},
                "2025-03-11": {"color": "#70d7c7"},
                "2025-03-12": {"endingDay": true, "color": "#50cebb", "endingDayText": "Done"}
            }"##,
        )
        .unwrap();

        assert_eq!(markings.len(), 3);
        assert_eq!(markings[&ymd(2025, 3, 10)].kind, MarkingKind::RangeStart);
        assert_eq!(markings[&ymd(2025, 3, 11)].kind, MarkingKind::Day);
        assert_eq!(markings[&ymd(2025, 3, 12)].ending_text(), Some("Done"));
    }

    #[test]
    fn test_named_color_keeps_the_rest_of_the_file() {
        let markings = parse_markings(
            r##"{
                "2025-03-10": {"startingDay": true, "color": "teal"},
                "2025-03-11": {"color": "#50cebb"}
            }"##,
        )
        .unwrap();

        assert_eq!(markings.len(), 2);
        assert_eq!(markings[&ymd(2025, 3, 10)].kind, MarkingKind::RangeStart);
        assert_eq!(markings[&ymd(2025, 3, 10)].color, None);
        assert_eq!(
            markings[&ymd(2025, 3, 11)].color,
            Some(Color32::from_rgb(0x50, 0xce, 0xbb))
        );
    }

    #[test]
    fn test_parse_rejects_bad_dates() {
        assert!(parse_markings(r#"{"2025-13-40": {}}"#).is_err());
        assert!(parse_markings("[]").is_err());
    }

    #[test]
    fn test_period_markings_shape() {
        let color = Color32::from_rgb(0x50, 0xce, 0xbb);
        let period = period_markings(ymd(2025, 2, 27), ymd(2025, 3, 2), color);
        let kinds: Vec<_> = period.values().map(|m| m.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                MarkingKind::RangeStart,
                MarkingKind::Day,
                MarkingKind::Day,
                MarkingKind::RangeEnd { ending_text: None },
            ]
        );
    }

    #[test]
    fn test_period_markings_reversed_and_single() {
        let color = Color32::RED;
        let reversed = period_markings(ymd(2025, 1, 3), ymd(2025, 1, 1), color);
        assert_eq!(reversed.keys().next(), Some(&ymd(2025, 1, 1)));
        assert_eq!(reversed.len(), 3);

        let single = period_markings(ymd(2025, 1, 1), ymd(2025, 1, 1), color);
        assert_eq!(
            single[&ymd(2025, 1, 1)].kind,
            MarkingKind::SingleDayRange { ending_text: None }
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("marked.json");
        let mut markings = period_markings(ymd(2025, 5, 1), ymd(2025, 5, 3), Color32::BLUE);
        markings.insert(
            ymd(2025, 5, 3),
            Marking::range_end(Color32::BLUE).with_ending_text("Back"),
        );

        save_markings(&path, &markings).unwrap();
        assert_eq!(load_markings(&path).unwrap(), markings);
    }
}
