pub mod app_settings;
pub mod event;
pub mod persistence;
pub mod store;
pub mod ui_state;

pub use app_settings::AppSettings;
pub use event::{Event, EventData};
pub use persistence::Persistable;
pub use store::{DaySubscriber, EventStore, SubscriptionId};
pub use ui_state::UiState;
