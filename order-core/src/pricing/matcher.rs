//! Promotion rule matcher
//!
//! Validity of a rule at an evaluation instant: active flag, weekday set,
//! daily time window. Product eligibility lives on the rule itself.

use chrono::{Datelike, NaiveDateTime, Timelike};
use shared::models::PromotionRule;

/// Check whether a rule is currently valid
///
/// A rule applies when it is active, today's weekday is in its applicable set
/// (absent set means every day), and the time-of-day falls within its window
/// (absent window means all day).
pub fn is_rule_valid(rule: &PromotionRule, now: NaiveDateTime) -> bool {
    if !rule.is_active {
        return false;
    }

    if let Some(days) = &rule.active_days
        && !days.contains(now.weekday())
    {
        return false;
    }

    if let Some(window) = &rule.window {
        // Compare at minute precision, like the window bounds
        let current = chrono::NaiveTime::from_hms_opt(now.hour(), now.minute(), 0)
            .unwrap_or(chrono::NaiveTime::MIN);
        if !window.contains(current) {
            return false;
        }
    }

    true
}
