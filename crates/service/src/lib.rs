//! Service layer for the stopwatch timers.
//! - `storage` holds the reusable JSON file-backed map.
//! - `timers` defines the store abstraction, elapsed formatting and the service facade.
//! - `file` provides the file-backed `TimerStore`.

pub mod errors;
pub mod clock;
pub mod storage;
pub mod timers;
pub mod file;
