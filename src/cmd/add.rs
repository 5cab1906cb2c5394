use crate::calc::DayKey;
use crate::data::{Event, EventData, Persistable};
use anyhow::{ensure, Result};
use chrono::NaiveTime;

pub fn run(date: &str, title: &str, time: Option<&str>, end: Option<&str>) -> Result<()> {
    let event = build_event(date, title, time, end)?;
    let mut data = EventData::load()?;
    data.add(event);
    data.save()?;
    println!("Added \"{}\" on {}.", title, date);
    Ok(())
}

pub(crate) fn build_event(
    date: &str,
    title: &str,
    time: Option<&str>,
    end: Option<&str>,
) -> Result<Event> {
    let day = DayKey::parse_iso(date);
    ensure!(!day.is_none(), "invalid date '{}', expected YYYY-MM-DD", date);
    ensure!(!title.trim().is_empty(), "event title must not be empty");
    let mut event = Event::on_day(date, title.trim());
    if let Some(time) = time {
        ensure!(
            NaiveTime::parse_from_str(time, "%H:%M").is_ok(),
            "invalid time '{}', expected HH:MM",
            time
        );
        event.time = Some(time.to_string());
    }
    if let Some(end) = end {
        let end_day = DayKey::parse_iso(end);
        ensure!(!end_day.is_none(), "invalid end date '{}', expected YYYY-MM-DD", end);
        ensure!(end_day >= day, "end date '{}' is before start date '{}'", end, date);
        event.end_date = Some(end.to_string());
    }
    Ok(event)
}
