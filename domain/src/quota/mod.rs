//! Message quota arithmetic.
//!
//! A quota record counts the messages one user sent on one local calendar
//! day. The day rolls over at local midnight: a new day simply means a new
//! key, old records are never mutated again.

use crate::plan::catalog::PlanDefinition;
use chrono::NaiveDate;

/// Composite key of a quota record: (user identity, local calendar day).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuotaKey {
    user_id: String,
    day: NaiveDate,
}

impl QuotaKey {
    pub fn new(user_id: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            day,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// The day part in its stable `YYYY-MM-DD` storage form.
    pub fn day_str(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for QuotaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.user_id, self.day_str())
    }
}

/// Whether a count has reached the plan's daily limit.
///
/// Unlimited plans are never exhausted, whatever the count says.
pub fn is_exhausted(count: u32, plan: &PlanDefinition) -> bool {
    match plan.max_messages_per_day.limit() {
        Some(limit) => count >= limit,
        None => false,
    }
}
