use crate::calc::DayKey;

/// Range notification emitted by the windowed models and drained by the
/// render host. Positions are linear row indices at the time the change
/// was recorded; `Reset` invalidates everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Inserted { start: usize, count: usize },
    Removed { start: usize, count: usize },
    Changed { start: usize, count: usize },
    Reset,
}

/// One renderable agenda row. An empty or not-yet-fetched day renders as
/// exactly one `Empty` placeholder row, never as zero rows.
#[derive(Debug, Clone, PartialEq)]
pub enum AgendaRow {
    Header { day: DayKey, title: String },
    Event { day: DayKey, title: String, time: Option<String> },
    Empty { day: DayKey },
}
