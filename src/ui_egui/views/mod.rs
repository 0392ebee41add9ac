pub mod period_day_cell;
pub mod period_style;
pub mod update_gate;

pub use period_day_cell::{
    DateFilter, DayCallback, DayCellEvent, DayCellResponse, DayCellVisual, DayLabel, DayProps,
    DerivedStyle, EndingMarker, FillerVisual, PeriodDay, RangeMarker, SubText, SubTextFn,
};
pub use period_style::{ContainerFragment, DayStyleSheet, FillerFragment, TextFragment};
pub use update_gate::{DayCellMemo, WatchedProp};
