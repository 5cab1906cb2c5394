pub mod day_key;

pub use day_key::{DayKey, DAY_MILLIS};
