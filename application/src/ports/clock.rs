//! Clock port
//!
//! The quota tracker keys records by the local calendar day. Taking the
//! day through a port keeps day-rollover behavior testable with a fixed
//! clock, and lets deployments pin a timezone if local time is not the
//! right boundary.

use chrono::NaiveDate;

/// Source of "today" for quota day keys.
pub trait Clock: Send + Sync {
    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}
