//! Static state of a day within the visible calendar page.

use serde::{Deserialize, Serialize};

/// State the parent grid assigns to a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Selected,
    Disabled,
    Today,
    #[default]
    Empty,
}
