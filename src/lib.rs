mod unexpected_status_error;

pub mod availability;
pub mod checker;
pub mod config;
pub mod diff;
pub mod feed;
pub mod notifier;
pub mod requests;
pub mod state;
pub mod utils;
pub mod venue;
pub mod venue_checker;

pub use checker::{AvailabilityChecker, CheckResult};
pub use config::{CheckerConfig, NotifyMode};
pub use unexpected_status_error::UnexpectedStatusError;
