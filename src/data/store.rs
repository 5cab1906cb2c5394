use crate::calc::DayKey;
use crate::data::event::{Event, EventData};
use std::collections::{HashMap, VecDeque};

/// Handle to a per-day change subscription held by a bound day-slot.
/// Released when the slot is pruned or the owning view is torn down.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(pub(crate) u64);

/// The seam between the windowed list and the event store: day-slots
/// acquire a subscription when their events are bound and release it when
/// the slot goes away.
pub trait DaySubscriber {
    fn subscribe(&mut self, day: DayKey) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Local event store with an asynchronous query façade: fetches are
/// fire-and-forget, correlated by day, and delivered on a later tick via
/// `take_completed`. Mutations re-queue fetches for subscribed days only,
/// so a pruned slot's stale request simply finds no slot to bind to.
pub struct EventStore {
    data: EventData,
    queue: VecDeque<DayKey>,
    subscriptions: HashMap<SubscriptionId, DayKey>,
    next_subscription: u64,
}

impl EventStore {
    pub fn new(data: EventData) -> EventStore {
        EventStore {
            data,
            queue: VecDeque::new(),
            subscriptions: HashMap::new(),
            next_subscription: 0,
        }
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Queues a fetch of the events overlapping `day`. No-op for the
    /// sentinel. Duplicate requests are allowed; binding is idempotent.
    pub fn request(&mut self, day: DayKey) {
        if day.is_none() {
            return;
        }
        self.queue.push_back(day);
    }

    /// Delivers every queued fetch, in request order.
    pub fn take_completed(&mut self) -> Vec<(DayKey, Vec<Event>)> {
        let mut completed = Vec::with_capacity(self.queue.len());
        while let Some(day) = self.queue.pop_front() {
            let events = self.data.overlapping(day, day.add_days(1));
            completed.push((day, events));
        }
        completed
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn add(&mut self, event: Event) {
        let (start, end) = (event.day(), event.last_day().add_days(1));
        self.data.add(event);
        self.notify_changed(start, end);
    }

    pub fn remove(&mut self, date: &str, title: &str) {
        let spans: Vec<(DayKey, DayKey)> = self
            .data
            .events
            .iter()
            .filter(|e| e.date == date && e.title == title)
            .map(|e| (e.day(), e.last_day().add_days(1)))
            .collect();
        self.data.remove(date, title);
        for (start, end) in spans {
            self.notify_changed(start, end);
        }
    }

    /// Re-queues a fetch for every subscribed day overlapping [start, end).
    fn notify_changed(&mut self, start: DayKey, end: DayKey) {
        if start.is_none() || end.is_none() {
            return;
        }
        let mut days: Vec<DayKey> = self
            .subscriptions
            .values()
            .copied()
            .filter(|day| *day >= start && *day < end)
            .collect();
        days.sort();
        days.dedup();
        for day in days {
            self.request(day);
        }
    }
}

impl DaySubscriber for EventStore {
    fn subscribe(&mut self, day: DayKey) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, day);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DayKey {
        DayKey::parse_iso(s)
    }

    fn store_with(events: Vec<Event>) -> EventStore {
        let mut data = EventData::default();
        for e in events {
            data.add(e);
        }
        EventStore::new(data)
    }

    #[test]
    fn test_request_and_take_completed() {
        let mut store = store_with(vec![Event::on_day("2025-03-05", "A")]);
        store.request(key("2025-03-05"));
        store.request(key("2025-03-06"));
        let completed = store.take_completed();
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].0, key("2025-03-05"));
        assert_eq!(completed[0].1.len(), 1);
        assert!(completed[1].1.is_empty());
        assert!(!store.has_pending());
    }

    #[test]
    fn test_request_sentinel_is_noop() {
        let mut store = store_with(vec![]);
        store.request(DayKey::NONE);
        assert!(!store.has_pending());
    }

    #[test]
    fn test_add_requeues_subscribed_day_only() {
        let mut store = store_with(vec![]);
        let _id = store.subscribe(key("2025-03-05"));
        store.add(Event::on_day("2025-03-05", "New"));
        store.add(Event::on_day("2025-03-09", "Unwatched"));
        let completed = store.take_completed();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].0, key("2025-03-05"));
        assert_eq!(completed[0].1.len(), 1);
    }

    #[test]
    fn test_multi_day_event_notifies_each_subscribed_day() {
        let mut store = store_with(vec![]);
        store.subscribe(key("2025-03-05"));
        store.subscribe(key("2025-03-06"));
        store.subscribe(key("2025-03-08"));
        let mut e = Event::on_day("2025-03-05", "Trip");
        e.end_date = Some("2025-03-06".to_string());
        store.add(e);
        let days: Vec<DayKey> = store.take_completed().into_iter().map(|(d, _)| d).collect();
        assert_eq!(days, vec![key("2025-03-05"), key("2025-03-06")]);
    }

    #[test]
    fn test_remove_notifies_removed_span() {
        let mut store = store_with(vec![Event::on_day("2025-03-05", "Gone")]);
        store.subscribe(key("2025-03-05"));
        store.remove("2025-03-05", "Gone");
        let completed = store.take_completed();
        assert_eq!(completed.len(), 1);
        assert!(completed[0].1.is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = store_with(vec![]);
        let id = store.subscribe(key("2025-03-05"));
        store.unsubscribe(id);
        assert_eq!(store.subscription_count(), 0);
        store.add(Event::on_day("2025-03-05", "New"));
        assert!(!store.has_pending());
    }

    #[test]
    fn test_duplicate_subscriptions_notify_once() {
        let mut store = store_with(vec![]);
        store.subscribe(key("2025-03-05"));
        store.subscribe(key("2025-03-05"));
        store.add(Event::on_day("2025-03-05", "New"));
        assert_eq!(store.take_completed().len(), 1);
    }
}
