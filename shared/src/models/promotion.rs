//! Promotion Rule Model
//!
//! Bundle/BOGO promotions: once `items_required` eligible units are in the
//! cart, a unit is granted free per complete bundle. Rules can be restricted
//! to a set of weekdays and a daily time window.
//!
//! The catalog stores rules in a loose shape (`RawPromotionRule`: day-index
//! list, "HH:MM" strings). The promotion source validates that shape into the
//! typed `PromotionRule` once, at the boundary, so the pricing engine never
//! re-parses schedule data.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating a raw rule at the promotion-source boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromotionValidationError {
    #[error("invalid day index {0}, expected 0..=6 (0=Sunday)")]
    InvalidDay(u8),

    #[error("active day list is empty; omit it to mean every day")]
    EmptyDays,

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("time window requires both start and end")]
    MissingWindowBound,

    #[error("items_required must be at least 1, got {0}")]
    InvalidBundleSize(i64),

    #[error("items_free must be at least 1, got {0}")]
    InvalidFreeCount(i64),
}

/// Set of applicable weekdays, encoded as a 7-bit mask
///
/// Day indices follow the catalog encoding: 0=Sunday .. 6=Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Every day of the week
    pub const ALL: WeekdaySet = WeekdaySet(0x7F);

    /// Build a set from catalog day indices (0=Sunday .. 6=Saturday)
    pub fn from_day_indices(days: &[u8]) -> Result<Self, PromotionValidationError> {
        if days.is_empty() {
            return Err(PromotionValidationError::EmptyDays);
        }
        let mut mask = 0u8;
        for &day in days {
            if day > 6 {
                return Err(PromotionValidationError::InvalidDay(day));
            }
            mask |= 1 << day;
        }
        Ok(WeekdaySet(mask))
    }

    /// Check whether a weekday is in the set
    pub fn contains(&self, weekday: Weekday) -> bool {
        let day = weekday.num_days_from_sunday() as u8;
        self.0 & (1 << day) != 0
    }

    /// Day indices in the set, ascending (0=Sunday .. 6=Saturday)
    pub fn day_indices(&self) -> Vec<u8> {
        (0u8..7).filter(|d| self.0 & (1 << d) != 0).collect()
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = PromotionValidationError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        WeekdaySet::from_day_indices(&days)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.day_indices()
    }
}

/// Daily time window during which a rule applies
///
/// Windows where `start > end` span midnight (e.g. 22:00-02:00), matching
/// late-opening establishments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Parse catalog "HH:MM" bounds into a typed window
    pub fn parse(start: &str, end: &str) -> Result<Self, PromotionValidationError> {
        let start_time = NaiveTime::parse_from_str(start, "%H:%M")
            .map_err(|_| PromotionValidationError::InvalidTime(start.to_string()))?;
        let end_time = NaiveTime::parse_from_str(end, "%H:%M")
            .map_err(|_| PromotionValidationError::InvalidTime(end.to_string()))?;
        Ok(TimeWindow {
            start: start_time,
            end: end_time,
        })
    }

    /// Check whether a time-of-day falls inside the window (bounds inclusive)
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            time >= self.start && time <= self.end
        } else {
            // Overnight window
            time >= self.start || time <= self.end
        }
    }
}

/// Validated promotion rule consumed by the pricing engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromotionRule {
    pub id: i64,
    /// Display name (shown on the discount line)
    pub name: String,
    pub is_active: bool,
    /// Product IDs the bundle counts
    pub eligible_products: Vec<String>,
    /// Eligible units required to complete one bundle
    pub items_required: u32,
    /// Free units granted per complete bundle
    ///
    /// The engine currently frees exactly one unit per bundle; values above 1
    /// are carried for the admin surface but do not change the computation.
    pub items_free: u32,
    /// Applicable weekdays; absent means every day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_days: Option<WeekdaySet>,
    /// Daily time window; absent means all day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
}

impl PromotionRule {
    /// Check whether a product counts toward this rule's bundles
    pub fn is_eligible(&self, product_id: &str) -> bool {
        self.eligible_products.iter().any(|p| p == product_id)
    }
}

/// Promotion rule as stored by the catalog (admin surface shape)
///
/// Day list and time bounds are loosely typed here; `into_rule` is the single
/// place they are validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPromotionRule {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub eligible_products: Vec<String>,
    pub items_required: i64,
    pub items_free: i64,
    /// Active days of week (0=Sunday..6=Saturday)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_days: Option<Vec<u8>>,
    /// Active start time (HH:MM format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_start_time: Option<String>,
    /// Active end time (HH:MM format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_end_time: Option<String>,
}

impl RawPromotionRule {
    /// Validate into a typed rule
    pub fn into_rule(self) -> Result<PromotionRule, PromotionValidationError> {
        if self.items_required < 1 {
            return Err(PromotionValidationError::InvalidBundleSize(
                self.items_required,
            ));
        }
        if self.items_free < 1 {
            return Err(PromotionValidationError::InvalidFreeCount(self.items_free));
        }

        let active_days = match self.active_days {
            Some(days) => Some(WeekdaySet::from_day_indices(&days)?),
            None => None,
        };

        let window = match (self.active_start_time, self.active_end_time) {
            (Some(start), Some(end)) => Some(TimeWindow::parse(&start, &end)?),
            (None, None) => None,
            _ => return Err(PromotionValidationError::MissingWindowBound),
        };

        Ok(PromotionRule {
            id: self.id,
            name: self.name,
            is_active: self.is_active,
            eligible_products: self.eligible_products,
            items_required: self.items_required as u32,
            items_free: self.items_free as u32,
            active_days,
            window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_raw(days: Option<Vec<u8>>, start: Option<&str>, end: Option<&str>) -> RawPromotionRule {
        RawPromotionRule {
            id: 1,
            name: "2x1 Tacos".to_string(),
            is_active: true,
            eligible_products: vec!["taco_pastor".to_string()],
            items_required: 2,
            items_free: 1,
            active_days: days,
            active_start_time: start.map(String::from),
            active_end_time: end.map(String::from),
        }
    }

    #[test]
    fn test_weekday_set_contains() {
        // Tuesday (2) and Saturday (6)
        let set = WeekdaySet::from_day_indices(&[2, 6]).unwrap();
        assert!(set.contains(Weekday::Tue));
        assert!(set.contains(Weekday::Sat));
        assert!(!set.contains(Weekday::Sun));
        assert!(!set.contains(Weekday::Wed));
    }

    #[test]
    fn test_weekday_set_rejects_invalid_index() {
        assert_eq!(
            WeekdaySet::from_day_indices(&[1, 7]),
            Err(PromotionValidationError::InvalidDay(7))
        );
        assert_eq!(
            WeekdaySet::from_day_indices(&[]),
            Err(PromotionValidationError::EmptyDays)
        );
    }

    #[test]
    fn test_weekday_set_roundtrip() {
        let set = WeekdaySet::from_day_indices(&[5, 0, 3]).unwrap();
        assert_eq!(set.day_indices(), vec![0, 3, 5]);
    }

    #[test]
    fn test_time_window_same_day() {
        let window = TimeWindow::parse("11:00", "15:30").unwrap();
        assert!(window.contains(NaiveTime::from_hms_opt(11, 0, 0).unwrap()));
        assert!(window.contains(NaiveTime::from_hms_opt(13, 45, 0).unwrap()));
        assert!(window.contains(NaiveTime::from_hms_opt(15, 30, 0).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(15, 31, 0).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
    }

    #[test]
    fn test_time_window_overnight() {
        let window = TimeWindow::parse("22:00", "02:00").unwrap();
        assert!(window.contains(NaiveTime::from_hms_opt(23, 15, 0).unwrap()));
        assert!(window.contains(NaiveTime::from_hms_opt(1, 0, 0).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn test_raw_rule_validates() {
        let rule = make_raw(Some(vec![1, 2, 3]), Some("11:00"), Some("16:00"))
            .into_rule()
            .unwrap();
        assert_eq!(rule.items_required, 2);
        assert!(rule.active_days.unwrap().contains(Weekday::Mon));
        assert!(rule.window.is_some());
        assert!(rule.is_eligible("taco_pastor"));
        assert!(!rule.is_eligible("agua_fresca"));
    }

    #[test]
    fn test_raw_rule_no_schedule_means_always() {
        let rule = make_raw(None, None, None).into_rule().unwrap();
        assert!(rule.active_days.is_none());
        assert!(rule.window.is_none());
    }

    #[test]
    fn test_raw_rule_rejects_half_window() {
        let err = make_raw(None, Some("11:00"), None).into_rule().unwrap_err();
        assert_eq!(err, PromotionValidationError::MissingWindowBound);
    }

    #[test]
    fn test_raw_rule_rejects_bad_time() {
        let err = make_raw(None, Some("11:00"), Some("25:99"))
            .into_rule()
            .unwrap_err();
        assert_eq!(
            err,
            PromotionValidationError::InvalidTime("25:99".to_string())
        );
    }

    #[test]
    fn test_raw_rule_rejects_zero_bundle() {
        let mut raw = make_raw(None, None, None);
        raw.items_required = 0;
        assert_eq!(
            raw.into_rule().unwrap_err(),
            PromotionValidationError::InvalidBundleSize(0)
        );
    }
}
