//! Clock port: source of the current time of day.

use growlink_domain::time::{self, TimeOfDay};

/// Provides the wall-clock time of day used by the analyzer.
pub trait Clock: Send + Sync {
    fn time_of_day(&self) -> TimeOfDay;
}

/// [`Clock`] reading the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn time_of_day(&self) -> TimeOfDay {
        time::local_time_of_day()
    }
}
