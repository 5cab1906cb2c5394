use crate::calc::DayKey;

/// Slots in the month pool: buffer, left, active, right, buffer.
pub const POOL_SIZE: usize = 5;

/// Render directive emitted by the pager and drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerChange {
    /// The slot's month or selection highlight changed; rebind it.
    Rebound { slot: usize },
    ActiveChanged { active: usize },
    MonthChanged { month: DayKey },
}

/// Fixed-capacity ring of consecutive months used for swipe navigation.
/// Logical months are data (`months`); physical slots are just indices.
/// Reaching a pool boundary rotates the ring instead of growing it.
pub struct MonthPager {
    months: [DayKey; POOL_SIZE],
    active: usize,
    selected: DayKey,
    changes: Vec<PagerChange>,
}

impl MonthPager {
    pub fn new(today: DayKey) -> MonthPager {
        let today = if today.is_none() { DayKey::today() } else { today };
        let mid = POOL_SIZE / 2;
        let anchor = today.month_first_day().add_months(-(mid as i32));
        MonthPager::from_anchor(anchor, today)
    }

    /// Rebuilds the pool from its first (oldest) month, for state
    /// restoration. The active slot is the one holding the selected
    /// day's month, or the center if the selection is elsewhere.
    pub fn from_anchor(anchor: DayKey, selected: DayKey) -> MonthPager {
        let anchor = if anchor.is_none() {
            DayKey::today().month_first_day().add_months(-((POOL_SIZE / 2) as i32))
        } else {
            anchor.month_first_day()
        };
        let mut months = [DayKey::NONE; POOL_SIZE];
        for (i, slot) in months.iter_mut().enumerate() {
            *slot = anchor.add_months(i as i32);
        }
        // Clamp away from the buffer slots so a later ±1 page transition
        // always has room before rotation.
        let active = months
            .iter()
            .position(|m| selected.same_month(*m))
            .unwrap_or(POOL_SIZE / 2)
            .clamp(1, POOL_SIZE - 2);
        MonthPager {
            months,
            active,
            selected,
            changes: Vec::new(),
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_month(&self) -> DayKey {
        self.months[self.active]
    }

    pub fn month_at(&self, slot: usize) -> DayKey {
        self.months[slot.min(POOL_SIZE - 1)]
    }

    pub fn selected_day(&self) -> DayKey {
        self.selected
    }

    /// Oldest month in the pool, persisted as the restoration anchor.
    pub fn anchor(&self) -> DayKey {
        self.months[0]
    }

    /// User swipe by whole pages. Rotation happens afterwards if the
    /// swipe landed on a pool boundary.
    pub fn swipe(&mut self, delta: i32) {
        let target = self.active as i32 + delta;
        let target = target.clamp(0, POOL_SIZE as i32 - 1) as usize;
        if target == self.active {
            return;
        }
        self.active = target;
        self.changes.push(PagerChange::ActiveChanged { active: self.active });
        self.changes.push(PagerChange::MonthChanged {
            month: self.months[self.active],
        });
        self.settle();
    }

    /// Boundary check once scrolling goes idle: at either edge the pool
    /// rotates so the active slot regains a buffer on both sides.
    pub fn settle(&mut self) {
        if self.active == POOL_SIZE - 1 {
            self.shift_left();
            self.active = 1;
            self.changes.push(PagerChange::ActiveChanged { active: self.active });
        } else if self.active == 0 {
            self.shift_right();
            self.active = POOL_SIZE - 2;
            self.changes.push(PagerChange::ActiveChanged { active: self.active });
        }
    }

    /// shift Jan, Feb, Mar, Apr, [May] to Apr, [May], Jun, Jul, Aug;
    /// the three relabeled slots rebind.
    fn shift_left(&mut self) {
        for _ in 0..POOL_SIZE - 2 {
            let first = self.months[0];
            self.months.rotate_left(1);
            self.months[POOL_SIZE - 1] = first.add_months(POOL_SIZE as i32);
        }
        for slot in 0..POOL_SIZE - 2 {
            self.changes.push(PagerChange::Rebound { slot });
        }
    }

    /// shift [Jan], Feb, Mar, Apr, May to Oct, Nov, Dec, [Jan], Feb;
    /// the three relabeled slots rebind.
    fn shift_right(&mut self) {
        for _ in 0..POOL_SIZE - 2 {
            let last = self.months[POOL_SIZE - 1];
            self.months.rotate_right(1);
            self.months[0] = last.add_months(-(POOL_SIZE as i32));
        }
        for slot in (2..POOL_SIZE).rev() {
            self.changes.push(PagerChange::Rebound { slot });
        }
    }

    /// Applies a selection. Within the active month the highlight just
    /// rebinds; one month out pages by a single step. The caller never
    /// jumps further than one month (selection moves day by day; larger
    /// jumps re-anchor with `from_anchor`).
    pub fn set_selected_day(&mut self, day: DayKey) {
        if day.is_none() {
            return;
        }
        self.selected = day;
        let active_month = self.months[self.active];
        if day.same_month(active_month) {
            self.rebind_around_active();
        } else if day.month_before(active_month) {
            self.active -= 1;
            self.changes.push(PagerChange::ActiveChanged { active: self.active });
            self.changes.push(PagerChange::MonthChanged {
                month: self.months[self.active],
            });
            self.rebind_around_active();
            self.settle();
        } else if day.month_after(active_month) {
            self.active += 1;
            self.changes.push(PagerChange::ActiveChanged { active: self.active });
            self.changes.push(PagerChange::MonthChanged {
                month: self.months[self.active],
            });
            self.rebind_around_active();
            self.settle();
        }
    }

    /// Rebinds the active slot and its neighbours, which may hold a stale
    /// selection highlight.
    fn rebind_around_active(&mut self) {
        let lo = self.active.saturating_sub(1);
        let hi = (self.active + 1).min(POOL_SIZE - 1);
        for slot in lo..=hi {
            self.changes.push(PagerChange::Rebound { slot });
        }
    }

    pub fn drain_changes(&mut self) -> Vec<PagerChange> {
        std::mem::take(&mut self.changes)
    }
}
