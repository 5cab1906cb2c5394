use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Milliseconds in one day. `DayKey` values are always a multiple of this.
pub const DAY_MILLIS: i64 = 86_400_000;

/// A day-granularity timestamp: milliseconds since the epoch at midnight,
/// with no time-of-day component. The sentinel `DayKey::NONE` stands for
/// "no time" and makes every operation degrade to a safe default instead
/// of panicking.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DayKey(i64);

impl DayKey {
    pub const NONE: DayKey = DayKey(-1);

    /// Truncates an arbitrary timestamp to its midnight. Negative input
    /// maps to the sentinel.
    pub fn from_millis(millis: i64) -> DayKey {
        if millis < 0 {
            return DayKey::NONE;
        }
        DayKey(millis - millis % DAY_MILLIS)
    }

    pub fn from_date(date: NaiveDate) -> DayKey {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let days = date.signed_duration_since(epoch).num_days();
        if days < 0 {
            return DayKey::NONE;
        }
        DayKey(days * DAY_MILLIS)
    }

    pub fn today() -> DayKey {
        DayKey::from_date(Local::now().date_naive())
    }

    pub fn is_none(self) -> bool {
        self.0 < 0
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn date(self) -> Option<NaiveDate> {
        if self.is_none() {
            return None;
        }
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        epoch.checked_add_signed(chrono::Duration::days(self.0 / DAY_MILLIS))
    }

    pub fn add_days(self, days: i64) -> DayKey {
        if self.is_none() {
            return DayKey::NONE;
        }
        DayKey::from_millis(self.0 + days * DAY_MILLIS)
    }

    /// 1-based day of month, or 0 for the sentinel.
    pub fn day_of_month(self) -> u32 {
        self.date().map(|d| d.day()).unwrap_or(0)
    }

    pub fn month_first_day(self) -> DayKey {
        match self.date() {
            Some(d) => DayKey::from_date(d.with_day(1).unwrap_or(d)),
            None => DayKey::NONE,
        }
    }

    pub fn month_last_day(self) -> DayKey {
        match self.date() {
            Some(d) => {
                let last = days_in_month(d.year(), d.month());
                DayKey::from_date(d.with_day(last).unwrap_or(d))
            }
            None => DayKey::NONE,
        }
    }

    /// Number of days in this key's month, or 0 for the sentinel.
    pub fn month_size(self) -> u32 {
        match self.date() {
            Some(d) => days_in_month(d.year(), d.month()),
            None => 0,
        }
    }

    /// Column offset of day 1 of this key's month relative to the given
    /// week start (0..=6), or 0 for the sentinel.
    pub fn month_first_day_offset(self, week_start: Weekday) -> u32 {
        match self.date() {
            Some(d) => {
                let first = d.with_day(1).unwrap_or(d);
                (7 + first.weekday().num_days_from_sunday()
                    - week_start.num_days_from_sunday())
                    % 7
            }
            None => 0,
        }
    }

    /// Calendar-correct month arithmetic: the day of month is clamped to
    /// the target month's length rather than rolling over.
    pub fn add_months(self, months: i32) -> DayKey {
        let date = match self.date() {
            Some(d) => d,
            None => return DayKey::NONE,
        };
        let year = date.year();
        let month = date.month() as i32;
        let total = month - 1 + months;
        let new_month = ((total % 12 + 12) % 12 + 1) as u32;
        let new_year = year + total.div_euclid(12);
        let max_day = days_in_month(new_year, new_month);
        let new_day = date.day().min(max_day);
        match NaiveDate::from_ymd_opt(new_year, new_month, new_day) {
            Some(d) => DayKey::from_date(d),
            None => self,
        }
    }

    /// True iff this key's month strictly precedes `other`'s month.
    /// Compares against the first day of `other`'s month, so two days in
    /// the same month are never "before" each other.
    pub fn month_before(self, other: DayKey) -> bool {
        if self.is_none() || other.is_none() {
            return false;
        }
        self < other.month_first_day()
    }

    /// True iff this key's month strictly follows `other`'s month.
    pub fn month_after(self, other: DayKey) -> bool {
        if self.is_none() || other.is_none() {
            return false;
        }
        self > other.month_last_day()
    }

    pub fn same_month(self, other: DayKey) -> bool {
        match (self.date(), other.date()) {
            (Some(a), Some(b)) => a.year() == b.year() && a.month() == b.month(),
            _ => false,
        }
    }

    /// Short header label, e.g. "Mon, Feb 16". Empty for the sentinel.
    pub fn day_label(self) -> String {
        match self.date() {
            Some(d) => d.format("%a, %b %-d").to_string(),
            None => String::new(),
        }
    }

    /// ISO date string, e.g. "2026-02-16". Empty for the sentinel.
    pub fn iso_date(self) -> String {
        match self.date() {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => String::new(),
        }
    }

    /// Parses an ISO "YYYY-MM-DD" date string; the sentinel on failure.
    pub fn parse_iso(s: &str) -> DayKey {
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => DayKey::from_date(d),
            Err(_) => DayKey::NONE,
        }
    }

    /// Month title, e.g. "February 2026". Empty for the sentinel.
    pub fn month_label(self) -> String {
        match self.date() {
            Some(d) => format!("{} {}", month_name(d.month()), d.year()),
            None => String::new(),
        }
    }
}

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
        .num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_from_millis_strips_time_of_day() {
        let noon = key(2025, 3, 15).millis() + DAY_MILLIS / 2;
        assert_eq!(DayKey::from_millis(noon), key(2025, 3, 15));
    }

    #[test]
    fn test_from_millis_negative_is_none() {
        assert!(DayKey::from_millis(-1).is_none());
        assert!(DayKey::from_millis(-DAY_MILLIS).is_none());
    }

    #[test]
    fn test_key_is_day_multiple() {
        let k = key(2026, 8, 7);
        assert_eq!(k.millis() % DAY_MILLIS, 0);
        assert_eq!(DayKey::today().millis() % DAY_MILLIS, 0);
    }

    #[test]
    fn test_add_days_is_contiguous() {
        let k = key(2025, 2, 28);
        assert_eq!(k.add_days(1), key(2025, 3, 1));
        assert_eq!(k.add_days(-28), key(2025, 1, 31));
        assert_eq!(k.add_days(1).millis() - k.millis(), DAY_MILLIS);
    }

    #[test]
    fn test_day_of_month() {
        assert_eq!(key(2025, 7, 19).day_of_month(), 19);
        assert_eq!(DayKey::NONE.day_of_month(), 0);
    }

    #[test]
    fn test_month_first_and_last_day() {
        let k = key(2025, 2, 14);
        assert_eq!(k.month_first_day(), key(2025, 2, 1));
        assert_eq!(k.month_last_day(), key(2025, 2, 28));
        assert_eq!(key(2024, 2, 14).month_last_day(), key(2024, 2, 29));
        assert!(DayKey::NONE.month_first_day().is_none());
        assert!(DayKey::NONE.month_last_day().is_none());
    }

    #[test]
    fn test_month_size() {
        assert_eq!(key(2025, 1, 10).month_size(), 31);
        assert_eq!(key(2025, 4, 10).month_size(), 30);
        assert_eq!(key(2024, 2, 1).month_size(), 29);
        assert_eq!(DayKey::NONE.month_size(), 0);
    }

    #[test]
    fn test_month_first_day_offset_sunday_start() {
        // 2025-06-01 is a Sunday
        assert_eq!(key(2025, 6, 15).month_first_day_offset(Weekday::Sun), 0);
        // 2025-07-01 is a Tuesday
        assert_eq!(key(2025, 7, 4).month_first_day_offset(Weekday::Sun), 2);
    }

    #[test]
    fn test_month_first_day_offset_monday_start() {
        // 2025-06-01 (Sunday) is the last column when weeks start on Monday
        assert_eq!(key(2025, 6, 15).month_first_day_offset(Weekday::Mon), 6);
        assert_eq!(key(2025, 7, 4).month_first_day_offset(Weekday::Mon), 1);
        assert_eq!(DayKey::NONE.month_first_day_offset(Weekday::Mon), 0);
    }

    #[test]
    fn test_add_months_clamps_day_of_month() {
        assert_eq!(key(2025, 1, 31).add_months(1), key(2025, 2, 28));
        assert_eq!(key(2024, 1, 31).add_months(1), key(2024, 2, 29));
        assert_eq!(key(2025, 3, 31).add_months(-1), key(2025, 2, 28));
    }

    #[test]
    fn test_add_months_crosses_year_boundaries() {
        assert_eq!(key(2025, 11, 15).add_months(3), key(2026, 2, 15));
        assert_eq!(key(2025, 2, 15).add_months(-3), key(2024, 11, 15));
        assert_eq!(key(2025, 6, 1).add_months(12), key(2026, 6, 1));
    }

    #[test]
    fn test_add_months_from_first_day_lands_in_next_month() {
        // For any day d, addMonths(monthFirstDay(d), 1) is day 1 of the
        // immediately following month.
        let d = key(2025, 12, 27);
        let next = d.month_first_day().add_months(1);
        assert_eq!(next, key(2026, 1, 1));
        assert_eq!(next.day_of_month(), 1);
    }

    #[test]
    fn test_add_months_none_is_none() {
        assert!(DayKey::NONE.add_months(1).is_none());
        assert!(DayKey::NONE.add_months(-1).is_none());
    }

    #[test]
    fn test_month_before() {
        assert!(key(2025, 1, 31).month_before(key(2025, 2, 1)));
        // Same month, earlier day: not "before" the month
        assert!(!key(2025, 2, 1).month_before(key(2025, 2, 28)));
        assert!(!key(2025, 3, 1).month_before(key(2025, 2, 28)));
        assert!(!DayKey::NONE.month_before(key(2025, 2, 1)));
        assert!(!key(2025, 1, 1).month_before(DayKey::NONE));
    }

    #[test]
    fn test_month_after() {
        assert!(key(2025, 3, 1).month_after(key(2025, 2, 28)));
        // Same month, later day: not "after" the month
        assert!(!key(2025, 2, 28).month_after(key(2025, 2, 1)));
        assert!(!key(2025, 1, 31).month_after(key(2025, 2, 1)));
        assert!(!DayKey::NONE.month_after(key(2025, 1, 1)));
    }

    #[test]
    fn test_same_month() {
        assert!(key(2025, 2, 1).same_month(key(2025, 2, 28)));
        assert!(!key(2025, 2, 1).same_month(key(2026, 2, 1)));
        assert!(!DayKey::NONE.same_month(DayKey::NONE));
    }

    #[test]
    fn test_iso_date_roundtrip() {
        let k = key(2025, 11, 3);
        assert_eq!(k.iso_date(), "2025-11-03");
        assert_eq!(DayKey::parse_iso("2025-11-03"), k);
        assert!(DayKey::parse_iso("not-a-date").is_none());
        assert_eq!(DayKey::NONE.iso_date(), "");
    }

    #[test]
    fn test_labels() {
        // 2026-02-16 is a Monday
        assert_eq!(key(2026, 2, 16).day_label(), "Mon, Feb 16");
        assert_eq!(key(2026, 2, 16).month_label(), "February 2026");
        assert_eq!(DayKey::NONE.day_label(), "");
        assert_eq!(DayKey::NONE.month_label(), "");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2028, 2), 29);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
    }
}
