use chrono::NaiveDate;

use crate::model::Iteration;

/// Finds the first iteration whose inclusive date range contains `date`.
pub fn resolve_iteration<'a, I>(date: NaiveDate, iterations: I) -> Option<&'a Iteration>
where
    I: IntoIterator<Item = &'a Iteration>,
{
    iterations.into_iter().find(|it| it.contains(date))
}

/// Finds the latest iteration that starts on or before `date` without
/// containing it.
///
/// Used to fill the week of an item whose due date falls into a gap between
/// iterations or beyond the last one. Returns `None` when `date` precedes
/// every candidate.
pub fn resolve_preceding_iteration<'a, I>(date: NaiveDate, iterations: I) -> Option<&'a Iteration>
where
    I: IntoIterator<Item = &'a Iteration>,
{
    let mut sorted: Vec<&Iteration> = iterations.into_iter().collect();
    sorted.sort_by_key(|it| it.start_date);

    sorted
        .into_iter()
        .rfind(|it| it.start_date <= date && !it.contains(date))
}
