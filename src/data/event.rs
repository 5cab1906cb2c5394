use crate::calc::DayKey;
use crate::data::persistence::Persistable;
use serde::{Deserialize, Serialize};

/// A calendar event. `time` is the "HH:MM" start time; absent means
/// all-day. `end_date` makes the event span multiple days (inclusive).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub title: String,
}

impl Event {
    pub fn on_day(date: &str, title: &str) -> Event {
        Event {
            date: date.to_string(),
            time: None,
            end_date: None,
            title: title.to_string(),
        }
    }

    pub fn day(&self) -> DayKey {
        DayKey::parse_iso(&self.date)
    }

    /// Last day covered by this event; the start day when there is no end
    /// date or the end date is malformed or earlier than the start.
    pub fn last_day(&self) -> DayKey {
        let start = self.day();
        match self.end_date.as_deref().map(DayKey::parse_iso) {
            Some(end) if !end.is_none() && end > start => end,
            _ => start,
        }
    }

    /// True iff this event overlaps [start, end): it starts within the
    /// range, or starts before and ends on or after the range start.
    pub fn overlaps(&self, start: DayKey, end: DayKey) -> bool {
        if start.is_none() || end.is_none() {
            return false;
        }
        let day = self.day();
        if day.is_none() {
            return false;
        }
        day < end && self.last_day() >= start
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct EventData {
    pub events: Vec<Event>,
}

impl Persistable for EventData {
    fn filename() -> &'static str {
        "events.json"
    }
    fn is_json() -> bool {
        true
    }
}

impl EventData {
    pub fn add(&mut self, event: Event) {
        self.events.push(event);
        // All-day events (no time) sort ahead of timed ones on the same day
        self.events
            .sort_by(|a, b| (&a.date, &a.time, &a.title).cmp(&(&b.date, &b.time, &b.title)));
    }

    pub fn remove(&mut self, date: &str, title: &str) {
        self.events
            .retain(|e| !(e.date == date && e.title == title));
    }

    /// Events overlapping [start, end), ordered by start time.
    pub fn overlapping(&self, start: DayKey, end: DayKey) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.overlaps(start, end))
            .cloned()
            .collect()
    }

    /// Events overlapping the single day `day`.
    pub fn events_for(&self, day: DayKey) -> Vec<Event> {
        self.overlapping(day, day.add_days(1))
    }
}
