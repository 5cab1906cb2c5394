use crate::calc::{DayKey, DAY_MILLIS};
use crate::data::store::{DaySubscriber, SubscriptionId};
use crate::data::Event;
use crate::model::notify::{AgendaRow, ListChange};

/// Days added per growth step.
pub const BLOCK_DAYS: usize = 31;
/// Maximum materialized days; exceeding this prunes whole blocks from the
/// end opposite the direction of growth.
pub const MAX_DAYS: usize = BLOCK_DAYS * 2;

/// One day-slot in the window: a header plus either the day's events or a
/// single placeholder child. Events are unbound until the slot first
/// becomes visible and a fetch completes.
#[derive(Debug)]
struct DayGroup {
    day: DayKey,
    title: String,
    events: Option<Vec<Event>>,
    last_count: usize,
    subscription: Option<SubscriptionId>,
}

impl DayGroup {
    fn new(day: DayKey) -> DayGroup {
        DayGroup {
            day,
            title: day.day_label(),
            events: None,
            last_count: 0,
            subscription: None,
        }
    }

    /// Child rows under this day's header: the event count, or 1 for the
    /// placeholder when unbound or empty.
    fn item_count(&self) -> usize {
        match &self.events {
            Some(events) if !events.is_empty() => events.len(),
            _ => 1,
        }
    }

    fn row(&self, index: usize) -> AgendaRow {
        match &self.events {
            Some(events) if !events.is_empty() => {
                let event = &events[index.min(events.len() - 1)];
                AgendaRow::Event {
                    day: self.day,
                    title: event.title.clone(),
                    time: event.time.clone(),
                }
            }
            _ => AgendaRow::Empty { day: self.day },
        }
    }
}

/// Direction of a deferred window-growth step. Growth triggered while
/// binding a boundary row is applied on the next UI tick rather than
/// re-entrantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    Prepend,
    Append,
}

/// An effectively unbounded, chronologically ordered list of day-slots
/// that keeps at most `MAX_DAYS` materialized. Blocks are contiguous in
/// day keys with no gaps or overlaps, and the window is never empty.
pub struct AgendaWindow {
    groups: Vec<DayGroup>,
    children: usize,
    locked: bool,
    pending_growth: Option<Growth>,
    changes: Vec<ListChange>,
}

impl AgendaWindow {
    /// Seeds one block starting at `start` (today, typically). A sentinel
    /// start falls back to today.
    pub fn new(start: DayKey) -> AgendaWindow {
        AgendaWindow::from_range(start, BLOCK_DAYS)
    }

    /// Rebuilds a window over [start, start + days) with every slot
    /// unbound, for state restoration.
    pub fn from_range(start: DayKey, days: usize) -> AgendaWindow {
        let start = if start.is_none() { DayKey::today() } else { start };
        let days = days.clamp(1, MAX_DAYS);
        let groups: Vec<DayGroup> = (0..days)
            .map(|i| DayGroup::new(start.add_days(i as i64)))
            .collect();
        let children = groups.iter().map(|g| g.item_count()).sum();
        AgendaWindow {
            groups,
            children,
            locked: false,
            pending_growth: None,
            changes: Vec::new(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.groups.len() + self.children
    }

    pub fn first_day(&self) -> DayKey {
        self.groups.first().map(|g| g.day).unwrap_or(DayKey::NONE)
    }

    pub fn last_day(&self) -> DayKey {
        self.groups.last().map(|g| g.day).unwrap_or(DayKey::NONE)
    }

    pub fn days(&self) -> usize {
        self.groups.len()
    }

    pub fn contains(&self, day: DayKey) -> bool {
        !day.is_none() && day >= self.first_day() && day <= self.last_day()
    }

    /// Index of the group for `day`, relying on window contiguity.
    fn group_index(&self, day: DayKey) -> Option<usize> {
        if !self.contains(day) {
            return None;
        }
        Some(((day.millis() - self.first_day().millis()) / DAY_MILLIS) as usize)
    }

    /// Linear row position of the group's header.
    fn header_position(&self, group_index: usize) -> usize {
        self.groups[..group_index]
            .iter()
            .map(|g| g.item_count() + 1)
            .sum()
    }

    pub fn row_at(&self, position: usize) -> Option<AgendaRow> {
        let mut cursor = 0;
        for group in &self.groups {
            if position == cursor {
                return Some(AgendaRow::Header {
                    day: group.day,
                    title: group.title.clone(),
                });
            }
            let span = group.item_count() + 1;
            if position < cursor + span {
                return Some(group.row(position - cursor - 1));
            }
            cursor += span;
        }
        None
    }

    /// Day owning the row at `position`.
    pub fn day_at(&self, position: usize) -> Option<DayKey> {
        let mut cursor = 0;
        for group in &self.groups {
            let span = group.item_count() + 1;
            if position < cursor + span {
                return Some(group.day);
            }
            cursor += span;
        }
        None
    }

    /// Marks the row at `position` bound. Returns the day to fetch when a
    /// header becomes visible before its events have been requested.
    /// Binding a boundary row schedules deferred growth. Suppressed
    /// entirely while the binding lock is held.
    pub fn bind(&mut self, position: usize) -> Option<DayKey> {
        if self.locked {
            return None;
        }
        let total = self.item_count();
        if position >= total {
            return None;
        }
        if position == 0 {
            self.pending_growth = Some(Growth::Prepend);
        } else if position + 1 == total {
            self.pending_growth = Some(Growth::Append);
        }
        let mut cursor = 0;
        for group in &self.groups {
            if position == cursor {
                return if group.events.is_none() {
                    Some(group.day)
                } else {
                    None
                };
            }
            let span = group.item_count() + 1;
            if position < cursor + span {
                return None;
            }
            cursor += span;
        }
        None
    }

    pub fn take_pending_growth(&mut self) -> Option<Growth> {
        self.pending_growth.take()
    }

    pub fn grow(&mut self, growth: Growth, subscriber: &mut impl DaySubscriber) {
        match growth {
            Growth::Prepend => self.prepend(subscriber),
            Growth::Append => self.append(subscriber),
        }
    }

    /// Extends the window by one block of days immediately preceding the
    /// current first day, then prunes from the trailing end.
    pub fn prepend(&mut self, subscriber: &mut impl DaySubscriber) {
        let mut inserted = 0;
        for _ in 0..BLOCK_DAYS {
            let first = match self.groups.first() {
                Some(g) => g.day,
                None => return,
            };
            let group = DayGroup::new(first.add_days(-1));
            inserted += group.item_count() + 1;
            self.children += group.item_count();
            self.groups.insert(0, group);
        }
        self.changes.push(ListChange::Inserted {
            start: 0,
            count: inserted,
        });
        self.prune(false, subscriber);
    }

    /// Extends the window by one block of days immediately following the
    /// current last day, then prunes from the leading end.
    pub fn append(&mut self, subscriber: &mut impl DaySubscriber) {
        let start = self.item_count();
        let mut inserted = 0;
        for _ in 0..BLOCK_DAYS {
            let last = match self.groups.last() {
                Some(g) => g.day,
                None => return,
            };
            let group = DayGroup::new(last.add_days(1));
            inserted += group.item_count() + 1;
            self.children += group.item_count();
            self.groups.push(group);
        }
        self.changes.push(ListChange::Inserted {
            start,
            count: inserted,
        });
        self.prune(true, subscriber);
    }

    /// Removes whole day-slots from one end until within `MAX_DAYS`,
    /// releasing each removed slot's subscription.
    fn prune(&mut self, from_start: bool, subscriber: &mut impl DaySubscriber) {
        if self.groups.len() <= MAX_DAYS {
            return;
        }
        let mut removed = 0;
        let index = if from_start { 0 } else { MAX_DAYS };
        while self.groups.len() > MAX_DAYS {
            let group = self.groups.remove(index);
            removed += group.item_count() + 1;
            self.children -= group.item_count();
            if let Some(id) = group.subscription {
                subscriber.unsubscribe(id);
            }
        }
        let start = if from_start { 0 } else { self.item_count() };
        self.changes.push(ListChange::Removed {
            start,
            count: removed,
        });
    }

    /// Row position of `day`'s header, growing the window block by block
    /// when the day falls outside the current range. `None` only for the
    /// sentinel.
    pub fn position_of(
        &mut self,
        day: DayKey,
        subscriber: &mut impl DaySubscriber,
    ) -> Option<usize> {
        if day.is_none() {
            return None;
        }
        while day < self.first_day() {
            self.prepend(subscriber);
        }
        while day > self.last_day() {
            self.append(subscriber);
        }
        let index = self.group_index(day)?;
        Some(self.header_position(index))
    }

    /// Attaches fetched events to the matching day-slot and records the
    /// row diff against the slot's previous event count. A result for a
    /// day no longer in the window (pruned before delivery) is dropped.
    /// Returns whether the result was bound.
    pub fn bind_events(
        &mut self,
        day: DayKey,
        events: Vec<Event>,
        subscriber: &mut impl DaySubscriber,
    ) -> bool {
        let index = match self.group_index(day) {
            Some(i) => i,
            None => return false,
        };
        let position = self.header_position(index);
        let group = &mut self.groups[index];
        if group.subscription.is_none() {
            group.subscription = Some(subscriber.subscribe(day));
        }
        let old_items = group.item_count();
        let previous = group.last_count;
        let current = events.len();
        group.events = Some(events);
        group.last_count = current;
        let new_items = group.item_count();
        self.children = self.children - old_items + new_items;

        // When either count is zero the single placeholder row swaps with
        // the first event row, and only the remainder inserts/removes.
        let mut refresh = previous.min(current);
        let mut diff = current as isize - previous as isize;
        if refresh == 0 {
            refresh = 1;
            if diff > 0 {
                diff -= 1;
            } else if diff < 0 {
                diff += 1;
            }
        }
        self.changes.push(ListChange::Changed {
            start: position + 1,
            count: refresh,
        });
        if diff > 0 {
            self.changes.push(ListChange::Inserted {
                start: position + 1 + refresh,
                count: diff as usize,
            });
        } else if diff < 0 {
            self.changes.push(ListChange::Removed {
                start: position + 1 + refresh,
                count: (-diff) as usize,
            });
        }
        true
    }

    /// Suspends binding (and fetch scheduling) during an active scroll.
    pub fn lock_binding(&mut self) {
        self.locked = true;
    }

    /// Releases the binding lock and requests a full refresh.
    pub fn unlock_binding(&mut self) {
        self.locked = false;
        self.changes.push(ListChange::Reset);
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn drain_changes(&mut self) -> Vec<ListChange> {
        std::mem::take(&mut self.changes)
    }

    /// Releases every slot's subscription, for view teardown.
    pub fn deactivate(&mut self, subscriber: &mut impl DaySubscriber) {
        for group in &mut self.groups {
            if let Some(id) = group.subscription.take() {
                subscriber.unsubscribe(id);
            }
        }
    }
}
