//! Release windows encoded in option names.
//!
//! Release options are named after the dates they cover, optionally followed
//! by a parenthesised tag: `"Mar 3 - Mar 14 (v2.1)"`, `"Dec 29 - Jan 9, 2025"`.
//! Either side may carry an explicit `, <year>`. A missing end year is taken
//! from the due date being matched; a missing start year is taken from the end
//! and moved back one year when the start month comes after the end month.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::DateWindow;
use crate::model::SelectOption;

const RANGE_SEPARATOR: &str = " - ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("no ' - ' separator in '{0}'")]
    NotARange(String),

    #[error("invalid date '{0}'")]
    BadDate(String),

    #[error("starts after it ends: {0} > {1}")]
    Inverted(NaiveDate, NaiveDate),
}

/// Parses the date range out of a release name.
///
/// `reference_year` fills in the end date when the name carries no year.
pub fn parse_release_window(
    name: &str,
    reference_year: i32,
) -> std::result::Result<DateWindow, WindowError> {
    let range = name.split('(').next().unwrap_or_default().trim();
    let (start_text, end_text) = range
        .split_once(RANGE_SEPARATOR)
        .ok_or_else(|| WindowError::NotARange(name.to_string()))?;

    let end = match split_year(end_text)? {
        (month_day, Some(year)) => parse_month_day(month_day, year)?,
        (month_day, None) => parse_month_day(month_day, reference_year)?,
    };

    let start = match split_year(start_text)? {
        (month_day, Some(year)) => parse_month_day(month_day, year)?,
        (month_day, None) => {
            let start = parse_month_day(month_day, end.year())?;
            if start.month() > end.month() {
                parse_month_day(month_day, end.year() - 1)?
            } else {
                start
            }
        }
    };

    DateWindow::new(start, end).ok_or(WindowError::Inverted(start, end))
}

/// Finds the first release whose window contains `date`.
///
/// Options whose names do not parse are skipped.
pub fn resolve_release<'a, I>(date: NaiveDate, releases: I) -> Option<&'a SelectOption>
where
    I: IntoIterator<Item = &'a SelectOption>,
{
    releases
        .into_iter()
        .find(|release| try_window(release, date.year()).is_some_and(|w| w.contains(date)))
}

fn try_window(release: &SelectOption, reference_year: i32) -> Option<DateWindow> {
    match parse_release_window(&release.name, reference_year) {
        Ok(window) => {
            tracing::debug!(release = %release.name, window = %window, "Parsed release window");
            Some(window)
        }
        Err(WindowError::NotARange(_)) => None,
        Err(e) => {
            tracing::warn!(release = %release.name, error = %e, "Skipping unparsable release");
            None
        }
    }
}

/// Splits `"Jan 9, 2025"` into `("Jan 9", Some(2025))`.
fn split_year(token: &str) -> std::result::Result<(&str, Option<i32>), WindowError> {
    match token.split_once(',') {
        Some((month_day, year)) => {
            let year = year
                .trim()
                .parse::<i32>()
                .map_err(|_| WindowError::BadDate(token.trim().to_string()))?;
            Ok((month_day.trim(), Some(year)))
        }
        None => Ok((token.trim(), None)),
    }
}

fn parse_month_day(month_day: &str, year: i32) -> std::result::Result<NaiveDate, WindowError> {
    NaiveDate::parse_from_str(&format!("{} {}", month_day, year), "%B %d %Y")
        .map_err(|_| WindowError::BadDate(format!("{}, {}", month_day, year)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn release(id: &str, name: &str) -> SelectOption {
        SelectOption::new(id, name)
    }

    #[test]
    fn test_parse_with_version_tag() {
        let w = parse_release_window("Mar 3 - Mar 14 (v2.1)", 2025).unwrap();
        assert_eq!(w.start(), date("2025-03-03"));
        assert_eq!(w.end(), date("2025-03-14"));
    }

    #[test]
    fn test_year_rollover() {
        let w = parse_release_window("Dec 29 - Jan 9, 2025", 2024).unwrap();
        assert_eq!(w.start(), date("2024-12-29"));
        assert_eq!(w.end(), date("2025-01-09"));
        assert!(w.contains(date("2024-12-30")));
    }

    #[test]
    fn test_explicit_years_on_both_sides() {
        let w = parse_release_window("Nov 20, 2023 - Feb 2, 2024", 2030).unwrap();
        assert_eq!(w.start(), date("2023-11-20"));
        assert_eq!(w.end(), date("2024-02-02"));
    }

    #[test]
    fn test_end_year_defaults_to_reference_year() {
        let w = parse_release_window("Jun 2 - Jun 13", 2026).unwrap();
        assert_eq!(w.end(), date("2026-06-13"));
    }

    #[test]
    fn test_full_month_names_parse() {
        let w = parse_release_window("March 3 - March 14", 2025).unwrap();
        assert_eq!(w.start(), date("2025-03-03"));
    }

    #[test]
    fn test_missing_separator_is_not_a_range() {
        assert_eq!(
            parse_release_window("Backlog", 2025),
            Err(WindowError::NotARange("Backlog".to_string()))
        );
        assert!(parse_release_window("Mar 3-Mar 14", 2025).is_err());
    }

    #[test]
    fn test_garbage_tokens_fail() {
        assert!(matches!(
            parse_release_window("Soon - Later", 2025),
            Err(WindowError::BadDate(_))
        ));
        assert!(matches!(
            parse_release_window("Mar 3 - Mar 14, next year", 2025),
            Err(WindowError::BadDate(_))
        ));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        assert!(matches!(
            parse_release_window("Mar 20, 2025 - Mar 3, 2025", 2025),
            Err(WindowError::Inverted(_, _))
        ));
    }

    #[test]
    fn test_resolve_is_inclusive_at_both_ends() {
        let releases = vec![release("r1", "Mar 3 - Mar 14 (v2.1)")];
        assert!(resolve_release(date("2025-03-03"), &releases).is_some());
        assert!(resolve_release(date("2025-03-14"), &releases).is_some());
        assert!(resolve_release(date("2025-03-15"), &releases).is_none());
        assert!(resolve_release(date("2025-03-02"), &releases).is_none());
    }

    #[test]
    fn test_resolve_skips_broken_candidates() {
        let releases = vec![
            release("bad", "Someday - Maybe"),
            release("none", "Backlog"),
            release("good", "Mar 3 - Mar 14"),
        ];
        assert_eq!(resolve_release(date("2025-03-05"), &releases).unwrap().id, "good");
    }

    #[test]
    fn test_resolve_across_year_boundary() {
        let releases = vec![release("r-ny", "Dec 29 - Jan 9, 2025")];
        assert_eq!(resolve_release(date("2024-12-30"), &releases).unwrap().id, "r-ny");
        assert_eq!(resolve_release(date("2025-01-09"), &releases).unwrap().id, "r-ny");
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let releases = vec![
            release("r1", "Mar 1 - Mar 31"),
            release("r2", "Mar 10 - Mar 20"),
        ];
        assert_eq!(resolve_release(date("2025-03-15"), &releases).unwrap().id, "r1");
    }
}
