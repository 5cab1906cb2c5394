use crate::calc::DayKey;
use crate::data::{AppSettings, EventData, EventStore, Persistable, UiState};
use crate::ui::calendar_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    let event_data = EventData::load()?;
    let saved = UiState::load().unwrap_or_default();

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let mut app = App::new(
        EventStore::new(event_data),
        settings,
        &saved,
        DayKey::today(),
    );

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    app.teardown();
    app.snapshot().save()?;
    app.store().data().save()?;

    result
}
