use crate::calc::DayKey;
use crate::data::persistence::Persistable;
use serde::{Deserialize, Serialize};

/// Flat snapshot carried across process recreation: the selected day, the
/// agenda window's bounds, and the pager's anchor month, all as raw
/// day-key timestamps (-1 = never saved).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UiState {
    pub selected_day: i64,
    pub agenda_start: i64,
    pub agenda_days: usize,
    pub pager_month: i64,
    pub show_month: bool,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            selected_day: -1,
            agenda_start: -1,
            agenda_days: 0,
            pager_month: -1,
            show_month: true,
        }
    }
}

impl Persistable for UiState {
    fn filename() -> &'static str {
        "ui_state.json"
    }
    fn is_json() -> bool {
        true
    }
}

impl UiState {
    pub fn selected_day_key(&self) -> DayKey {
        DayKey::from_millis(self.selected_day)
    }

    pub fn agenda_start_key(&self) -> DayKey {
        DayKey::from_millis(self.agenda_start)
    }

    pub fn pager_month_key(&self) -> DayKey {
        DayKey::from_millis(self.pager_month)
    }
}
