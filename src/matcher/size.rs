//! Size buckets derived from free-text effort estimates.
//!
//! Estimates look like `"3 days"`, `"1 week"` or `"30 min"`. They are
//! normalised to hours and placed into a bucket whose range is
//! lower-exclusive and upper-inclusive, so exactly 24 hours is still Tiny and
//! exactly 168 hours is still Large.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::model::SelectOption;

static ESTIMATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?|\.\d+)\s*([A-Za-z]+)").expect("estimate pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Week,
    Day,
    Hour,
    Minute,
}

impl DurationUnit {
    /// Accepts singular, plural and common short forms (`min`, `mins`, `hr`).
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        if token.starts_with("week") || token == "w" || token == "wk" || token == "wks" {
            Some(DurationUnit::Week)
        } else if token.starts_with("day") || token == "d" {
            Some(DurationUnit::Day)
        } else if token.starts_with("hour") || token == "h" || token == "hr" || token == "hrs" {
            Some(DurationUnit::Hour)
        } else if token.starts_with("min") {
            Some(DurationUnit::Minute)
        } else {
            None
        }
    }

    pub fn to_hours(self, amount: f64) -> f64 {
        match self {
            DurationUnit::Week => amount * 168.0,
            DurationUnit::Day => amount * 24.0,
            DurationUnit::Hour => amount,
            DurationUnit::Minute => amount / 60.0,
        }
    }
}

/// Normalises an estimate to hours.
///
/// Anything that is not `<number> <unit>` with a known unit counts as zero
/// hours, which falls below every bucket.
pub fn estimate_hours(estimate: &str) -> f64 {
    let Some(caps) = ESTIMATE_RE.captures(estimate) else {
        tracing::debug!(estimate, "Estimate is not '<number> <unit>'");
        return 0.0;
    };
    let Ok(amount) = caps[1].parse::<f64>() else {
        return 0.0;
    };
    match DurationUnit::from_token(&caps[2]) {
        Some(unit) => unit.to_hours(amount),
        None => {
            tracing::debug!(estimate, unit = &caps[2], "Unsupported estimate unit");
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeBucket {
    Tiny,
    Small,
    Medium,
    Large,
    XLarge,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 5] = [
        SizeBucket::Tiny,
        SizeBucket::Small,
        SizeBucket::Medium,
        SizeBucket::Large,
        SizeBucket::XLarge,
    ];

    /// Exclusive lower and inclusive upper bound in hours. `None` is unbounded.
    pub fn bounds(self) -> (f64, Option<f64>) {
        match self {
            SizeBucket::Tiny => (0.0, Some(24.0)),
            SizeBucket::Small => (24.0, Some(48.0)),
            SizeBucket::Medium => (48.0, Some(96.0)),
            SizeBucket::Large => (96.0, Some(168.0)),
            SizeBucket::XLarge => (168.0, None),
        }
    }

    pub fn contains(self, hours: f64) -> bool {
        let (lower, upper) = self.bounds();
        lower < hours && upper.is_none_or(|u| hours <= u)
    }

    /// Descriptive option name used on the project board.
    pub fn label(self) -> &'static str {
        match self {
            SizeBucket::Tiny => "Tiny (< 1 day, 1-6 hours)",
            SizeBucket::Small => "Small (1-2 days)",
            SizeBucket::Medium => "Medium (2+ -4 days)",
            SizeBucket::Large => "Large (4+ -7 days)",
            SizeBucket::XLarge => "X-Large (1-4 weeks)",
        }
    }

    /// Matches an option name against either the short name (`"Medium"`) or
    /// the descriptive label. Comparison is exact.
    pub fn from_option_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.to_string() == name || b.label() == name)
    }

    pub fn for_hours(hours: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.contains(hours))
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeBucket::Tiny => write!(f, "Tiny"),
            SizeBucket::Small => write!(f, "Small"),
            SizeBucket::Medium => write!(f, "Medium"),
            SizeBucket::Large => write!(f, "Large"),
            SizeBucket::XLarge => write!(f, "X-Large"),
        }
    }
}

/// Picks the size option matching an estimate.
///
/// Options are tried in the order given and the first whose bucket contains
/// the estimate wins. Options with names outside the bucket table are ignored.
pub fn classify<'a, I>(estimate: &str, sizes: I) -> Option<&'a SelectOption>
where
    I: IntoIterator<Item = &'a SelectOption>,
{
    let hours = estimate_hours(estimate);
    sizes.into_iter().find(|option| {
        SizeBucket::from_option_name(&option.name).is_some_and(|bucket| bucket.contains(hours))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_sizes() -> Vec<SelectOption> {
        SizeBucket::ALL
            .iter()
            .map(|b| SelectOption::new(format!("opt-{}", b), b.to_string()))
            .collect()
    }

    fn labelled_sizes() -> Vec<SelectOption> {
        SizeBucket::ALL
            .iter()
            .map(|b| SelectOption::new(format!("opt-{}", b), b.label()))
            .collect()
    }

    fn classified(estimate: &str) -> Option<String> {
        let sizes = short_sizes();
        classify(estimate, &sizes).map(|o| o.name.clone())
    }

    #[test]
    fn test_estimate_hours_units() {
        assert_eq!(estimate_hours("2 weeks"), 336.0);
        assert_eq!(estimate_hours("1 week"), 168.0);
        assert_eq!(estimate_hours("3 days"), 72.0);
        assert_eq!(estimate_hours("1 day"), 24.0);
        assert_eq!(estimate_hours("6 hours"), 6.0);
        assert_eq!(estimate_hours("30 min"), 0.5);
        assert_eq!(estimate_hours("90 minutes"), 1.5);
        assert_eq!(estimate_hours("1.5 days"), 36.0);
    }

    #[test]
    fn test_estimate_hours_unsupported_is_zero() {
        assert_eq!(estimate_hours("3 sprints"), 0.0);
        assert_eq!(estimate_hours("a while"), 0.0);
        assert_eq!(estimate_hours(""), 0.0);
    }

    #[test]
    fn test_concrete_scenarios() {
        assert_eq!(classified("3 days").as_deref(), Some("Medium"));
        assert_eq!(classified("1 week").as_deref(), Some("Large"));
        assert_eq!(classified("30 min").as_deref(), Some("Tiny"));
        assert_eq!(classified("2 weeks").as_deref(), Some("X-Large"));
    }

    #[test]
    fn test_upper_bound_belongs_to_bucket() {
        assert_eq!(classified("24 hours").as_deref(), Some("Tiny"));
        assert_eq!(classified("48 hours").as_deref(), Some("Small"));
        assert_eq!(classified("96 hours").as_deref(), Some("Medium"));
        assert_eq!(classified("168 hours").as_deref(), Some("Large"));
    }

    #[test]
    fn test_lower_bound_belongs_to_bucket_below() {
        assert_eq!(classified("0 hours"), None);
        assert_eq!(SizeBucket::for_hours(24.0), Some(SizeBucket::Tiny));
        assert_eq!(SizeBucket::for_hours(24.01), Some(SizeBucket::Small));
        assert_eq!(SizeBucket::for_hours(168.01), Some(SizeBucket::XLarge));
    }

    #[test]
    fn test_unsupported_unit_matches_nothing() {
        assert_eq!(classified("4 fortnights"), None);
    }

    #[test]
    fn test_descriptive_labels_match() {
        let sizes = labelled_sizes();
        let hit = classify("3 days", &sizes).unwrap();
        assert_eq!(hit.name, "Medium (2+ -4 days)");
    }

    #[test]
    fn test_unknown_option_names_are_skipped() {
        let sizes = vec![
            SelectOption::new("x", "Huge"),
            SelectOption::new("m", "medium"),
            SelectOption::new("M", "Medium"),
        ];
        assert_eq!(classify("3 days", &sizes).unwrap().id, "M");
    }

    #[test]
    fn test_first_matching_option_wins() {
        let sizes = vec![
            SelectOption::new("first", "Medium"),
            SelectOption::new("second", "Medium (2+ -4 days)"),
        ];
        assert_eq!(classify("3 days", &sizes).unwrap().id, "first");
    }
}
