use crate::calc::DayKey;
use crate::data::{EventData, Persistable};
use anyhow::Result;

pub fn run(days: u32) -> Result<()> {
    let event_data = EventData::load()?;
    write_agenda(&event_data, DayKey::today(), days, &mut std::io::stdout())
}

pub(crate) fn write_agenda<W: std::io::Write>(
    data: &EventData,
    start: DayKey,
    days: u32,
    out: &mut W,
) -> Result<()> {
    let days = days.max(1);
    let mut total = 0;
    for i in 0..days {
        let day = start.add_days(i as i64);
        writeln!(out, "{}", day.day_label())?;
        let events = data.events_for(day);
        if events.is_empty() {
            writeln!(out, "  (no events)")?;
        }
        for event in &events {
            writeln!(
                out,
                "  {:<8} {}",
                event.time.as_deref().unwrap_or("all-day"),
                event.title
            )?;
            total += 1;
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} event(s)", total)?;
    Ok(())
}
