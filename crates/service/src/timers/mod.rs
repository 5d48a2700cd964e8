//! Label → last-click timestamp tracking.

pub mod elapsed;
pub mod service;
pub mod store;

pub use elapsed::{ElapsedView, NEVER_CLICKED};
pub use service::TimerService;
pub use store::TimerStore;
