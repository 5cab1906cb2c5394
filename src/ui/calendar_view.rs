use crate::calc::DayKey;
use crate::data::{AppSettings, Event, EventStore, UiState};
use crate::model::{
    AgendaRow, AgendaWindow, Coordinator, ListChange, MonthPager, ScrollSync, SyncEffect,
    SyncOrigin,
};
use anyhow::Result;
use chrono::{Datelike, Weekday};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

const WEEK_COLUMNS: usize = 7;

#[derive(PartialEq)]
enum Mode {
    Normal,
    Add,
    Delete,
}

pub struct App {
    store: EventStore,
    window: AgendaWindow,
    pager: MonthPager,
    coordinator: Coordinator,
    scroll: ScrollSync,
    pub settings: AppSettings,
    today: DayKey,
    title: String,
    /// Month grid visibility (the toolbar toggle).
    show_month: bool,
    /// First visible agenda row; kept stable across window mutations by
    /// replaying the window's range notifications.
    agenda_offset: usize,
    agenda_height: usize,
    mode: Mode,
    input_buffer: String,
    cursor_index: usize,
    /// Transient status message (message, color). Cleared on next keypress.
    status: Option<(String, Color)>,
}

impl App {
    pub fn new(store: EventStore, settings: AppSettings, saved: &UiState, today: DayKey) -> App {
        let coordinator = Coordinator::restore(saved.selected_day_key());
        let selected = coordinator.selected_day();
        let window = if saved.agenda_start_key().is_none() || saved.agenda_days == 0 {
            AgendaWindow::new(today)
        } else {
            AgendaWindow::from_range(saved.agenda_start_key(), saved.agenda_days)
        };
        let pager = if saved.pager_month_key().is_none() {
            MonthPager::new(selected)
        } else {
            MonthPager::from_anchor(saved.pager_month_key(), selected)
        };
        let mut app = App {
            store,
            window,
            pager,
            coordinator,
            scroll: ScrollSync::new(),
            settings,
            today,
            title: String::new(),
            show_month: saved.show_month,
            agenda_offset: 0,
            agenda_height: 16,
            mode: Mode::Normal,
            input_buffer: String::new(),
            cursor_index: 0,
            status: None,
        };
        // Push the restored selection to both views and the title
        let effects = app.coordinator.sync(selected, SyncOrigin::Program);
        app.apply_effects(effects);
        app
    }

    pub fn selected_day(&self) -> DayKey {
        self.coordinator.selected_day()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Flat state snapshot persisted across process recreation.
    pub fn snapshot(&self) -> UiState {
        UiState {
            selected_day: self.coordinator.selected_day().millis(),
            agenda_start: self.window.first_day().millis(),
            agenda_days: self.window.days(),
            pager_month: self.pager.anchor().millis(),
            show_month: self.show_month,
        }
    }

    /// Releases the window's store subscriptions, for shutdown.
    pub fn teardown(&mut self) {
        self.window.deactivate(&mut self.store);
    }

    /// One UI-loop step: apply deferred growth, deliver async fetch
    /// results, replay range notifications into the scroll offset, bind
    /// the visible rows, and feed user scrolling back to the coordinator.
    pub fn tick(&mut self) {
        if let Some(growth) = self.window.take_pending_growth() {
            self.window.grow(growth, &mut self.store);
        }
        // Late results for days pruned meanwhile are dropped by the window
        for (day, events) in self.store.take_completed() {
            self.window.bind_events(day, events, &mut self.store);
        }
        for change in self.window.drain_changes() {
            self.apply_list_change(change);
        }
        let max_offset = self.window.item_count().saturating_sub(1);
        self.agenda_offset = self.agenda_offset.min(max_offset);

        let end = (self.agenda_offset + self.agenda_height).min(self.window.item_count());
        let mut fetches = Vec::new();
        for position in self.agenda_offset..end {
            if let Some(day) = self.window.bind(position) {
                fetches.push(day);
            }
        }
        for day in fetches {
            self.store.request(day);
        }

        if let Some(day) = self.window.day_at(self.agenda_offset) {
            if let Some(changed) = self.scroll.on_scrolled(self.agenda_offset, day) {
                let effects = self.coordinator.sync(changed, SyncOrigin::Agenda);
                self.apply_effects(effects);
            }
        }
        // Render reads pager state directly; directives only bound the buffer
        let _ = self.pager.drain_changes();
    }

    fn apply_effects(&mut self, effects: Vec<SyncEffect>) {
        for effect in effects {
            match effect {
                SyncEffect::SetAgenda(day) => {
                    if let Some(position) = self.window.position_of(day, &mut self.store) {
                        // `position` is already in post-growth coordinates;
                        // the growth notifications must not shift it again
                        let _ = self.window.drain_changes();
                        self.scroll.begin_programmatic(position);
                        self.agenda_offset = position;
                    }
                }
                SyncEffect::SetPager(day) => {
                    self.pager.set_selected_day(day);
                }
                SyncEffect::TitleChanged(title) => {
                    self.title = title;
                }
            }
        }
    }

    fn apply_list_change(&mut self, change: ListChange) {
        match change {
            ListChange::Inserted { start, count } => {
                if start <= self.agenda_offset {
                    self.agenda_offset += count;
                }
            }
            ListChange::Removed { start, count } => {
                if start + count <= self.agenda_offset {
                    self.agenda_offset -= count;
                } else if start < self.agenda_offset {
                    self.agenda_offset = start;
                }
            }
            ListChange::Changed { .. } | ListChange::Reset => {}
        }
    }

    fn move_selection(&mut self, days: i64) {
        let target = self.coordinator.selected_day().add_days(days);
        let effects = self.coordinator.sync(target, SyncOrigin::Program);
        self.apply_effects(effects);
    }

    /// Month swipe: pages the pool and carries the selected day-of-month
    /// into the target month (clamped to its length). The selection
    /// change originates from the pager, so only the agenda is told.
    fn swipe_month(&mut self, delta: i32) {
        self.pager.swipe(delta);
        let month = self.pager.active_month();
        let day_of_month = self.coordinator.selected_day().day_of_month().max(1);
        let clamped = day_of_month.min(month.month_size());
        let target = month.add_days(clamped as i64 - 1);
        let effects = self.coordinator.sync(target, SyncOrigin::Pager);
        self.apply_effects(effects);
        self.pager.set_selected_day(target);
    }

    fn commit_new_event(&mut self) {
        let text = self.input_buffer.trim();
        if text.is_empty() {
            return;
        }
        let (time, title) = split_time_prefix(text);
        let mut event = Event::on_day(&self.coordinator.selected_day().iso_date(), title);
        event.time = time;
        self.store.add(event);
        self.status = Some(("event added".to_string(), Color::Green));
    }

    fn selected_day_events(&self) -> Vec<Event> {
        self.store.data().events_for(self.coordinator.selected_day())
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.mode == Mode::Normal {
            self.status = None;
        }
        match self.mode {
            Mode::Add => {
                match code {
                    KeyCode::Enter => {
                        self.commit_new_event();
                        self.input_buffer.clear();
                        self.mode = Mode::Normal;
                        self.window.unlock_binding();
                    }
                    KeyCode::Esc => {
                        self.input_buffer.clear();
                        self.mode = Mode::Normal;
                        self.window.unlock_binding();
                    }
                    KeyCode::Backspace => {
                        self.input_buffer.pop();
                    }
                    KeyCode::Char(c) => {
                        self.input_buffer.push(c);
                    }
                    _ => {}
                }
                false
            }

            Mode::Delete => {
                let events = self.selected_day_events();
                match code {
                    KeyCode::Enter => {
                        if let Some(event) = events.get(self.cursor_index) {
                            self.store.remove(&event.date, &event.title);
                            self.status = Some(("event deleted".to_string(), Color::Yellow));
                        }
                        self.mode = Mode::Normal;
                        self.window.unlock_binding();
                    }
                    KeyCode::Esc => {
                        self.mode = Mode::Normal;
                        self.window.unlock_binding();
                    }
                    KeyCode::Up => {
                        if self.cursor_index > 0 {
                            self.cursor_index -= 1;
                        }
                    }
                    KeyCode::Down => {
                        if !events.is_empty() && self.cursor_index < events.len() - 1 {
                            self.cursor_index += 1;
                        }
                    }
                    _ => {}
                }
                false
            }

            Mode::Normal => {
                match code {
                    KeyCode::Left => self.move_selection(-1),
                    KeyCode::Right => self.move_selection(1),
                    KeyCode::Up => self.move_selection(-7),
                    KeyCode::Down => self.move_selection(7),
                    KeyCode::Char('j') => {
                        let max = self.window.item_count().saturating_sub(1);
                        self.agenda_offset = (self.agenda_offset + 1).min(max);
                    }
                    KeyCode::Char('k') => {
                        self.agenda_offset = self.agenda_offset.saturating_sub(1);
                    }
                    KeyCode::Char('[') => self.swipe_month(-1),
                    KeyCode::Char(']') => self.swipe_month(1),
                    KeyCode::Char('t') => {
                        let effects = self.coordinator.reset();
                        self.apply_effects(effects);
                    }
                    KeyCode::Tab => {
                        self.show_month = !self.show_month;
                    }
                    KeyCode::Char('a') => {
                        self.mode = Mode::Add;
                        self.input_buffer.clear();
                        self.window.lock_binding();
                    }
                    KeyCode::Char('d') => {
                        self.mode = Mode::Delete;
                        self.cursor_index = 0;
                        self.window.lock_binding();
                    }
                    KeyCode::Char('q') => return true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return true;
                    }
                    _ => {}
                }
                false
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let month_height = if self.show_month { 9 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(month_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());
        self.render_title(f, chunks[0]);
        if self.show_month {
            self.render_month(f, chunks[1]);
        }
        self.agenda_height = chunks[2].height as usize;
        self.render_agenda(f, chunks[2]);
        self.render_status(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("almanac", Style::default().add_modifier(Modifier::DIM)),
            Span::raw("  "),
            Span::styled(&self.title, Style::default().add_modifier(Modifier::BOLD)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_month(&self, f: &mut Frame, area: Rect) {
        let month = self.pager.active_month();
        let week_start = self.settings.week_start();
        let start_offset = month.month_first_day_offset(week_start) as usize;
        let days = month.month_size() as usize;
        let selected = self.coordinator.selected_day();

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                format!("{:^21}", month.month_label()),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Line::from(weekday_header(week_start)),
        ];

        let mut day = 1usize;
        for row in 0..6 {
            if day > days {
                break;
            }
            let mut spans = Vec::new();
            for col in 0..WEEK_COLUMNS {
                if (row == 0 && col < start_offset) || day > days {
                    spans.push(Span::raw("   "));
                    continue;
                }
                let date = month.add_days(day as i64 - 1);
                let is_weekend = date
                    .date()
                    .map(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
                    .unwrap_or(false);
                let has_event = !self.store.data().events_for(date).is_empty();
                let style = day_cell_style(
                    date == selected,
                    date == self.today,
                    is_weekend,
                    has_event,
                );
                spans.push(Span::styled(format!("{:2}", day), style));
                spans.push(Span::raw(" "));
                day += 1;
            }
            lines.push(Line::from(spans));
        }
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_agenda(&self, f: &mut Frame, area: Rect) {
        let selected = self.coordinator.selected_day();
        let end = (self.agenda_offset + area.height as usize).min(self.window.item_count());
        let mut lines: Vec<Line> = Vec::with_capacity(end - self.agenda_offset);
        for position in self.agenda_offset..end {
            let line = match self.window.row_at(position) {
                Some(AgendaRow::Header { day, title }) => {
                    let mut style = Style::default().add_modifier(Modifier::BOLD);
                    if day == selected {
                        style = style.add_modifier(Modifier::REVERSED);
                    } else if day == self.today {
                        style = style.fg(Color::Cyan);
                    }
                    Line::from(Span::styled(title.to_uppercase(), style))
                }
                Some(AgendaRow::Event { title, time, .. }) => Line::from(vec![
                    Span::styled(
                        format!("  {:<8}", time.as_deref().unwrap_or("all-day")),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(title),
                ]),
                Some(AgendaRow::Empty { .. }) => Line::from(Span::styled(
                    "  no events",
                    Style::default().add_modifier(Modifier::DIM),
                )),
                None => break,
            };
            lines.push(line);
        }
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let line = match self.mode {
            Mode::Add => Line::from(format!(
                "new event on {} ('HH:MM title' for a time): {}",
                self.coordinator.selected_day().iso_date(),
                self.input_buffer
            )),
            Mode::Delete => {
                let events = self.selected_day_events();
                let current = events
                    .get(self.cursor_index)
                    .map(|e| e.title.clone())
                    .unwrap_or_else(|| "(none)".to_string());
                Line::from(format!(
                    "delete ({}/{}): {} — Enter confirm, Esc cancel",
                    self.cursor_index + 1,
                    events.len().max(1),
                    current
                ))
            }
            Mode::Normal => match &self.status {
                Some((message, color)) => {
                    Line::from(Span::styled(message.clone(), Style::default().fg(*color)))
                }
                None => Line::from(Span::styled(
                    "arrows move · j/k scroll · [/] month · t today · a add · d delete · Tab grid · q quit",
                    Style::default().add_modifier(Modifier::DIM),
                )),
            },
        };
        f.render_widget(Paragraph::new(line), area);
    }
}

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Render helpers ────────────────────────────────────────────────────────────

/// Weekday header row for the month grid, honoring the week start.
pub(crate) fn weekday_header(week_start: Weekday) -> String {
    const NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
    let shift = week_start.num_days_from_sunday() as usize;
    (0..WEEK_COLUMNS)
        .map(|i| NAMES[(i + shift) % 7])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Determines the style for a month-grid day cell based on its state.
pub(crate) fn day_cell_style(
    is_selected: bool,
    is_today: bool,
    is_weekend: bool,
    has_event: bool,
) -> Style {
    if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if is_weekend {
        Style::default().add_modifier(Modifier::DIM)
    } else if has_event {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Splits a leading "HH:MM" token off an event input line.
pub(crate) fn split_time_prefix(text: &str) -> (Option<String>, &str) {
    if let Some((first, rest)) = text.split_once(' ') {
        if is_clock_time(first) && !rest.trim().is_empty() {
            return (Some(first.to_string()), rest.trim());
        }
    }
    (None, text)
}

fn is_clock_time(token: &str) -> bool {
    let Some((h, m)) = token.split_once(':') else {
        return false;
    };
    let hours: u32 = match h.parse() {
        Ok(v) => v,
        Err(_) => return false,
    };
    let minutes: u32 = match m.parse() {
        Ok(v) => v,
        Err(_) => return false,
    };
    h.len() <= 2 && m.len() == 2 && hours < 24 && minutes < 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EventData;

    fn key(s: &str) -> DayKey {
        DayKey::parse_iso(s)
    }

    fn make_app(today: &str, events: Vec<Event>) -> App {
        let mut data = EventData::default();
        for e in events {
            data.add(e);
        }
        let saved = UiState {
            selected_day: key(today).millis(),
            ..UiState::default()
        };
        App::new(
            EventStore::new(data),
            AppSettings::default(),
            &saved,
            key(today),
        )
    }

    /// Run a few ticks so queued fetches complete and growth settles.
    fn settle(app: &mut App) {
        for _ in 0..4 {
            app.tick();
        }
    }

    // ── day_cell_style tests ──────────────────────────────────────────────────

    #[test]
    fn test_style_selected() {
        let s = day_cell_style(true, false, false, false);
        assert_eq!(
            s,
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        );
    }

    #[test]
    fn test_style_today() {
        let s = day_cell_style(false, true, false, false);
        assert_eq!(s, Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));
    }

    #[test]
    fn test_style_weekend_beats_event() {
        let s = day_cell_style(false, false, true, true);
        assert_eq!(s, Style::default().add_modifier(Modifier::DIM));
    }

    #[test]
    fn test_style_has_event() {
        let s = day_cell_style(false, false, false, true);
        assert_eq!(s, Style::default().fg(Color::Cyan));
    }

    #[test]
    fn test_style_plain() {
        assert_eq!(day_cell_style(false, false, false, false), Style::default());
    }

    // ── helper tests ──────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_header_respects_week_start() {
        assert_eq!(weekday_header(Weekday::Sun), "Su Mo Tu We Th Fr Sa");
        assert_eq!(weekday_header(Weekday::Mon), "Mo Tu We Th Fr Sa Su");
    }

    #[test]
    fn test_split_time_prefix() {
        assert_eq!(
            split_time_prefix("09:30 Standup"),
            (Some("09:30".to_string()), "Standup")
        );
        assert_eq!(split_time_prefix("Lunch with Sam"), (None, "Lunch with Sam"));
        // A bare time with no title is a title, not a time
        assert_eq!(split_time_prefix("09:30"), (None, "09:30"));
        assert_eq!(split_time_prefix("25:00 Impossible"), (None, "25:00 Impossible"));
    }

    // ── app behavior tests ────────────────────────────────────────────────────

    #[test]
    fn test_startup_selects_saved_day_and_sets_title() {
        let mut app = make_app("2025-05-20", vec![]);
        settle(&mut app);
        assert_eq!(app.selected_day(), key("2025-05-20"));
        assert_eq!(app.title(), "May 2025");
    }

    #[test]
    fn test_arrow_keys_move_selection() {
        let mut app = make_app("2025-05-20", vec![]);
        settle(&mut app);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.selected_day(), key("2025-05-21"));
        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.selected_day(), key("2025-05-14"));
        settle(&mut app);
        assert_eq!(app.title(), "May 2025");
    }

    #[test]
    fn test_selection_into_next_month_pages_pager() {
        let mut app = make_app("2025-05-31", vec![]);
        settle(&mut app);
        assert_eq!(app.pager.active_month(), key("2025-05-01"));
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.selected_day(), key("2025-06-01"));
        assert_eq!(app.pager.active_month(), key("2025-06-01"));
    }

    #[test]
    fn test_month_swipe_keeps_day_of_month_clamped() {
        let mut app = make_app("2025-05-31", vec![]);
        settle(&mut app);
        app.handle_key(KeyCode::Char(']'), KeyModifiers::NONE);
        // June has 30 days; the 31st clamps
        assert_eq!(app.selected_day(), key("2025-06-30"));
        assert_eq!(app.pager.active_month(), key("2025-06-01"));
        app.handle_key(KeyCode::Char('['), KeyModifiers::NONE);
        assert_eq!(app.selected_day(), key("2025-05-30"));
    }

    #[test]
    fn test_scrolling_agenda_updates_selection() {
        let mut app = make_app("2025-05-20", vec![]);
        settle(&mut app);
        let before = app.selected_day();
        // Two rows per unbound day: scrolling two rows reaches the next day
        app.handle_key(KeyCode::Char('j'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('j'), KeyModifiers::NONE);
        settle(&mut app);
        assert_eq!(app.selected_day(), before.add_days(1));
    }

    #[test]
    fn test_add_event_reaches_store_and_window() {
        let mut app = make_app("2025-05-20", vec![]);
        settle(&mut app);
        app.handle_key(KeyCode::Char('a'), KeyModifiers::NONE);
        for c in "09:30 Standup".chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        settle(&mut app);
        let events = app.store().data().events_for(key("2025-05-20"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");
        assert_eq!(events[0].time.as_deref(), Some("09:30"));
    }

    #[test]
    fn test_delete_event_updates_store() {
        let mut app = make_app(
            "2025-05-20",
            vec![Event::on_day("2025-05-20", "Doomed")],
        );
        settle(&mut app);
        app.handle_key(KeyCode::Char('d'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        settle(&mut app);
        assert!(app.store().data().events_for(key("2025-05-20")).is_empty());
    }

    #[test]
    fn test_today_reset_is_idempotent() {
        let mut app = make_app("2025-05-20", vec![]);
        settle(&mut app);
        app.handle_key(KeyCode::Char('t'), KeyModifiers::NONE);
        let today = DayKey::today();
        assert_eq!(app.selected_day(), today);
        settle(&mut app);
        app.handle_key(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(app.selected_day(), today);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = make_app("2025-05-20", vec![]);
        assert!(app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.handle_key(KeyCode::Char('x'), KeyModifiers::NONE));
    }

    #[test]
    fn test_tab_toggles_month_grid() {
        let mut app = make_app("2025-05-20", vec![]);
        assert!(app.show_month);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert!(!app.show_month);
        assert!(!app.snapshot().show_month);
    }

    #[test]
    fn test_snapshot_roundtrips_through_new() {
        let mut app = make_app("2025-05-20", vec![]);
        settle(&mut app);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        settle(&mut app);
        let snapshot = app.snapshot();
        let restored = App::new(
            EventStore::new(EventData::default()),
            AppSettings::default(),
            &snapshot,
            key("2025-05-20"),
        );
        assert_eq!(restored.selected_day(), key("2025-05-21"));
        assert_eq!(restored.pager.anchor(), app.pager.anchor());
    }

    #[test]
    fn test_fetch_results_bind_into_window() {
        let mut app = make_app(
            "2025-05-20",
            vec![Event::on_day("2025-05-20", "Visible")],
        );
        settle(&mut app);
        // The selected day's header is at the viewport top; its event row
        // follows once the fetch delivered
        let header = app.agenda_offset;
        match app.window.row_at(header + 1) {
            Some(AgendaRow::Event { title, .. }) => assert_eq!(title, "Visible"),
            other => panic!("expected bound event row, got {:?}", other),
        }
    }

    #[test]
    fn test_modal_locks_binding_until_closed() {
        let mut app = make_app("2025-05-20", vec![]);
        settle(&mut app);
        app.handle_key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(app.window.is_locked());
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.window.is_locked());
    }
}
