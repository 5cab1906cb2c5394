use crate::calc::DayKey;

/// Which side produced a selection change. `Program` covers changes the
/// app makes on its own (restore, jump to today, key navigation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOrigin {
    Agenda,
    Pager,
    Program,
}

/// Directives the coordinator hands back to the host. The originating
/// view is never told about its own change.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEffect {
    SetAgenda(DayKey),
    SetPager(DayKey),
    TitleChanged(String),
}

/// Single authority for the selected day shared by the agenda window and
/// the month pager.
pub struct Coordinator {
    selected: DayKey,
}

impl Default for Coordinator {
    fn default() -> Self {
        Coordinator {
            selected: DayKey::NONE,
        }
    }
}

impl Coordinator {
    pub fn new() -> Coordinator {
        Coordinator::default()
    }

    /// Restores the persisted selection; absent (sentinel) defaults to
    /// today.
    pub fn restore(saved: DayKey) -> Coordinator {
        Coordinator {
            selected: if saved.is_none() { DayKey::today() } else { saved },
        }
    }

    pub fn selected_day(&self) -> DayKey {
        self.selected
    }

    /// Applies a selection change and returns what to push where. A
    /// sentinel day is a no-op.
    pub fn sync(&mut self, day: DayKey, origin: SyncOrigin) -> Vec<SyncEffect> {
        if day.is_none() {
            return Vec::new();
        }
        self.selected = day;
        let mut effects = Vec::new();
        if origin != SyncOrigin::Agenda {
            effects.push(SyncEffect::SetAgenda(day));
        }
        if origin != SyncOrigin::Pager {
            effects.push(SyncEffect::SetPager(day));
        }
        effects.push(SyncEffect::TitleChanged(day.month_label()));
        effects
    }

    /// Forces the selection back to today, notifying both views. Calling
    /// it again without an intervening change produces no notifications.
    pub fn reset(&mut self) -> Vec<SyncEffect> {
        let today = DayKey::today();
        if self.selected == today {
            return Vec::new();
        }
        self.sync(today, SyncOrigin::Program)
    }
}

/// Distinguishes user scrolling from programmatic scroll-to-position so
/// self-inflicted scrolls do not echo back as selection changes. A single
/// pending target is kept; rapid consecutive programmatic scrolls
/// overwrite it, and the earlier target's arrival may then notify as if
/// user-driven. Known limitation of the single-marker scheme.
pub struct ScrollSync {
    pending: Option<usize>,
    prev_day: DayKey,
}

impl Default for ScrollSync {
    fn default() -> Self {
        ScrollSync {
            pending: None,
            prev_day: DayKey::NONE,
        }
    }
}

impl ScrollSync {
    pub fn new() -> ScrollSync {
        ScrollSync::default()
    }

    /// Registers a programmatic scroll target about to be applied.
    pub fn begin_programmatic(&mut self, position: usize) {
        self.pending = Some(position);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Reports the top visible row after any scroll. Returns the newly
    /// active day only for user-driven movement; reaching the pending
    /// programmatic target clears it silently.
    pub fn on_scrolled(&mut self, first_visible: usize, day: DayKey) -> Option<DayKey> {
        let mut changed = None;
        if !day.is_none() && day != self.prev_day {
            self.prev_day = day;
            if self.pending.is_none() {
                changed = Some(day);
            }
        }
        if self.pending == Some(first_visible) {
            self.pending = None;
        }
        changed
    }
}
