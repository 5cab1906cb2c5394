pub mod agenda;
pub mod coordinator;
pub mod notify;
pub mod pager;

pub use agenda::{AgendaWindow, Growth, BLOCK_DAYS, MAX_DAYS};
pub use coordinator::{Coordinator, ScrollSync, SyncEffect, SyncOrigin};
pub use notify::{AgendaRow, ListChange};
pub use pager::{MonthPager, PagerChange, POOL_SIZE};
