//! System clock adapter.

use chatpro_application::Clock;
use chrono::{Local, NaiveDate};

/// Clock backed by the machine's local time.
///
/// The quota day boundary is therefore local midnight; deployments that
/// need a fixed timezone should provide their own [`Clock`] adapter.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
