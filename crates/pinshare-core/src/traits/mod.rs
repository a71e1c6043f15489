//! Core traits defined in `pinshare-core` and implemented by other crates.

pub mod clock;
pub mod file_store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use file_store::FileRecordStore;
