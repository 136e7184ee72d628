//! Turns matcher results into field updates.
//!
//! Three axes are reconciled independently: size from the estimate, then week
//! and release from the due date. An axis contributes one [`FieldUpdate`] when
//! it resolves to an option or iteration other than the one already set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::FieldNames;
use crate::error::{Result, SyncError};
use crate::matcher::{classify, resolve_iteration, resolve_preceding_iteration, resolve_release};
use crate::model::{
    FieldDefinition, FieldKind, FieldUpdate, IterationConfig, ProjectSchema, Reconciliation,
    SelectOption, WorkItem,
};

/// When an axis that already holds a value may be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdatePolicy {
    /// Replace any value that differs from the resolved one.
    #[default]
    Overwrite,
    /// Only fill axes that are empty. A due date between iterations falls
    /// back to the preceding iteration.
    FillEmpty,
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdatePolicy::Overwrite => write!(f, "overwrite"),
            UpdatePolicy::FillEmpty => write!(f, "fill-empty"),
        }
    }
}

impl FromStr for UpdatePolicy {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(UpdatePolicy::Overwrite),
            "fill-empty" | "fill_empty" | "fill" => Ok(UpdatePolicy::FillEmpty),
            _ => Err(SyncError::Parse(format!("Invalid update policy: {}", s))),
        }
    }
}

pub struct Reconciler<'a> {
    fields: &'a FieldNames,
    policy: UpdatePolicy,
}

impl<'a> Reconciler<'a> {
    pub fn new(fields: &'a FieldNames, policy: UpdatePolicy) -> Self {
        Self { fields, policy }
    }

    /// Computes the updates needed to bring `item` in line with its due date
    /// and estimate.
    ///
    /// Fails only when a field needed for an axis the item has input for is
    /// absent from the project.
    pub fn reconcile(&self, item: &WorkItem, schema: &ProjectSchema) -> Result<Reconciliation> {
        let mut rec = Reconciliation::default();

        if let Some(estimate) = item.estimate.as_deref() {
            self.reconcile_size(item, estimate, schema, &mut rec)?;
        }

        if let Some(due) = item.due_date {
            self.reconcile_week(item, due, schema, &mut rec)?;
            self.reconcile_release(item, due, schema, &mut rec)?;
        }

        Ok(rec)
    }

    fn reconcile_size(
        &self,
        item: &WorkItem,
        estimate: &str,
        schema: &ProjectSchema,
        rec: &mut Reconciliation,
    ) -> Result<()> {
        let Some((field, options)) = single_select(schema, &self.fields.size)? else {
            return Ok(());
        };
        let current = item.size.as_ref().map(|s| s.id.as_str());
        if let Some(size) = classify(estimate, options) {
            tracing::debug!(item = %item.id, estimate, size = %size.name, "Resolved size");
            self.push_option(rec, field, current, size);
        }
        Ok(())
    }

    fn reconcile_week(
        &self,
        item: &WorkItem,
        due: NaiveDate,
        schema: &ProjectSchema,
        rec: &mut Reconciliation,
    ) -> Result<()> {
        let Some((field, config)) = iteration_field(schema, &self.fields.week)? else {
            return Ok(());
        };
        let current = item.week.as_ref().map(|w| w.id.as_str());
        if self.policy == UpdatePolicy::FillEmpty && current.is_some() {
            return Ok(());
        }

        let week = match self.policy {
            UpdatePolicy::Overwrite => resolve_iteration(due, config.all()),
            UpdatePolicy::FillEmpty => resolve_iteration(due, config.all())
                .or_else(|| resolve_preceding_iteration(due, config.all())),
        };

        if let Some(week) = week {
            tracing::debug!(item = %item.id, due = %due, week = %week.title, "Resolved week");
            if self.should_write(current, &week.id) {
                rec.push(
                    FieldUpdate::new(&field.id, FieldKind::Iteration, &week.id),
                    &field.name,
                    &week.title,
                );
            }
        }
        Ok(())
    }

    fn reconcile_release(
        &self,
        item: &WorkItem,
        due: NaiveDate,
        schema: &ProjectSchema,
        rec: &mut Reconciliation,
    ) -> Result<()> {
        let Some((field, options)) = single_select(schema, &self.fields.release)? else {
            return Ok(());
        };
        let current = item.release.as_ref().map(|r| r.id.as_str());
        if let Some(release) = resolve_release(due, options) {
            tracing::debug!(item = %item.id, due = %due, release = %release.name, "Resolved release");
            self.push_option(rec, field, current, release);
        }
        Ok(())
    }

    fn push_option(
        &self,
        rec: &mut Reconciliation,
        field: &FieldDefinition,
        current: Option<&str>,
        resolved: &SelectOption,
    ) {
        if self.should_write(current, &resolved.id) {
            rec.push(
                FieldUpdate::new(&field.id, FieldKind::SingleSelect, &resolved.id),
                &field.name,
                &resolved.name,
            );
        }
    }

    fn should_write(&self, current: Option<&str>, resolved: &str) -> bool {
        match self.policy {
            UpdatePolicy::Overwrite => current != Some(resolved),
            UpdatePolicy::FillEmpty => current.is_none(),
        }
    }
}

fn lookup<'s>(schema: &'s ProjectSchema, name: &str) -> Result<&'s FieldDefinition> {
    schema
        .field(name)
        .ok_or_else(|| SyncError::MissingField(name.to_string()))
}

/// The named field and its options; `None` when it is not a single-select.
fn single_select<'s>(
    schema: &'s ProjectSchema,
    name: &str,
) -> Result<Option<(&'s FieldDefinition, &'s [SelectOption])>> {
    let field = lookup(schema, name)?;
    match field.options() {
        Some(options) => Ok(Some((field, options))),
        None => {
            tracing::warn!(field = name, kind = %field.kind(), "Expected a single-select field, skipping");
            Ok(None)
        }
    }
}

/// The named field and its iterations; `None` when it is not an iteration field.
fn iteration_field<'s>(
    schema: &'s ProjectSchema,
    name: &str,
) -> Result<Option<(&'s FieldDefinition, &'s IterationConfig)>> {
    let field = lookup(schema, name)?;
    match field.iterations() {
        Some(config) => Ok(Some((field, config))),
        None => {
            tracing::warn!(field = name, kind = %field.kind(), "Expected an iteration field, skipping");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Iteration;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn schema() -> ProjectSchema {
        ProjectSchema::new(
            "PVT_1",
            vec![
                FieldDefinition::single_select(
                    "F_size",
                    "Size",
                    vec![
                        SelectOption::new("S_tiny", "Tiny"),
                        SelectOption::new("S_small", "Small"),
                        SelectOption::new("S_medium", "Medium"),
                        SelectOption::new("S_large", "Large"),
                        SelectOption::new("S_xl", "X-Large"),
                    ],
                ),
                FieldDefinition::single_select(
                    "F_release",
                    "Release",
                    vec![
                        SelectOption::new("R_1", "Mar 3 - Mar 14 (v2.1)"),
                        SelectOption::new("R_2", "Mar 17 - Mar 28 (v2.2)"),
                    ],
                ),
                FieldDefinition::iteration(
                    "F_week",
                    "Week",
                    vec![Iteration::new("W_11", "Week 11", date("2025-03-10"), 7)],
                    vec![Iteration::new("W_10", "Week 10", date("2025-03-03"), 7)],
                ),
            ],
        )
    }

    fn overwrite(fields: &FieldNames) -> Reconciler<'_> {
        Reconciler::new(fields, UpdatePolicy::Overwrite)
    }

    #[test]
    fn test_no_inputs_yields_nothing() {
        let fields = FieldNames::default();
        let rec = overwrite(&fields)
            .reconcile(&WorkItem::new("I"), &schema())
            .unwrap();
        assert!(rec.updates.is_empty());
        assert!(rec.summary.is_empty());
    }

    #[test]
    fn test_no_inputs_do_not_need_fields() {
        let fields = FieldNames::default();
        let empty = ProjectSchema::new("PVT_0", vec![]);
        let rec = overwrite(&fields).reconcile(&WorkItem::new("I"), &empty).unwrap();
        assert!(rec.is_empty());
    }

    #[test]
    fn test_all_axes_in_order() {
        let fields = FieldNames::default();
        let item = WorkItem::new("I")
            .with_due_date(date("2025-03-10"))
            .with_estimate("3 days");
        let rec = overwrite(&fields).reconcile(&item, &schema()).unwrap();

        assert_eq!(
            rec.updates,
            vec![
                FieldUpdate::new("F_size", FieldKind::SingleSelect, "S_medium"),
                FieldUpdate::new("F_week", FieldKind::Iteration, "W_11"),
                FieldUpdate::new("F_release", FieldKind::SingleSelect, "R_1"),
            ]
        );
        let lines: Vec<String> = rec.summary.entries().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            lines,
            vec!["Size: Medium", "Week: Week 11", "Release: Mar 3 - Mar 14 (v2.1)"]
        );
    }

    #[test]
    fn test_completed_iterations_are_searched() {
        let fields = FieldNames::default();
        let item = WorkItem::new("I").with_due_date(date("2025-03-04"));
        let rec = overwrite(&fields).reconcile(&item, &schema()).unwrap();
        assert_eq!(rec.updates[0].value_id, "W_10");
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let fields = FieldNames::default();
        let schema = schema();
        let item = WorkItem::new("I")
            .with_due_date(date("2025-03-12"))
            .with_estimate("1 week");
        let first = overwrite(&fields).reconcile(&item, &schema).unwrap();
        assert_eq!(first.updates.len(), 3);

        let settled = item
            .with_size(SelectOption::new("S_large", "Large"))
            .with_week(Iteration::new("W_11", "Week 11", date("2025-03-10"), 7))
            .with_release(SelectOption::new("R_1", "Mar 3 - Mar 14 (v2.1)"));
        let second = overwrite(&fields).reconcile(&settled, &schema).unwrap();
        assert!(second.updates.is_empty());
        assert!(second.summary.is_empty());
    }

    #[test]
    fn test_stale_values_are_overwritten() {
        let fields = FieldNames::default();
        let item = WorkItem::new("I")
            .with_estimate("3 days")
            .with_size(SelectOption::new("S_tiny", "Tiny"));
        let rec = overwrite(&fields).reconcile(&item, &schema()).unwrap();
        assert_eq!(rec.updates, vec![FieldUpdate::new("F_size", FieldKind::SingleSelect, "S_medium")]);
    }

    #[test]
    fn test_unresolved_axes_contribute_nothing() {
        let fields = FieldNames::default();
        let item = WorkItem::new("I")
            .with_due_date(date("2026-01-01"))
            .with_estimate("someday");
        let rec = overwrite(&fields).reconcile(&item, &schema()).unwrap();
        assert!(rec.is_empty());
    }

    #[test]
    fn test_missing_size_field_is_an_error() {
        let fields = FieldNames::default();
        let mut schema = schema();
        schema.fields.retain(|f| f.name != "Size");
        let item = WorkItem::new("I").with_estimate("3 days");
        let err = overwrite(&fields).reconcile(&item, &schema).unwrap_err();
        assert!(matches!(err, SyncError::MissingField(name) if name == "Size"));
    }

    #[test]
    fn test_missing_size_field_ignored_without_estimate() {
        let fields = FieldNames::default();
        let mut schema = schema();
        schema.fields.retain(|f| f.name != "Size");
        let item = WorkItem::new("I").with_due_date(date("2025-03-10"));
        let rec = overwrite(&fields).reconcile(&item, &schema).unwrap();
        assert_eq!(rec.updates.len(), 2);
    }

    #[test]
    fn test_wrong_field_kind_skips_axis() {
        let fields = FieldNames::default();
        let mut schema = schema();
        for field in &mut schema.fields {
            if field.name == "Week" {
                *field = FieldDefinition::single_select("F_week", "Week", vec![]);
            }
        }
        let item = WorkItem::new("I").with_due_date(date("2025-03-10"));
        let rec = overwrite(&fields).reconcile(&item, &schema).unwrap();
        assert_eq!(rec.updates, vec![FieldUpdate::new("F_release", FieldKind::SingleSelect, "R_1")]);
    }

    #[test]
    fn test_custom_field_names() {
        let fields = FieldNames {
            size: "T-shirt".to_string(),
            ..FieldNames::default()
        };
        let mut schema = schema();
        for field in &mut schema.fields {
            if field.name == "Size" {
                field.name = "T-shirt".to_string();
            }
        }
        let item = WorkItem::new("I").with_estimate("2 hours");
        let rec = overwrite(&fields).reconcile(&item, &schema).unwrap();
        assert_eq!(rec.summary.entries()[0].to_string(), "T-shirt: Tiny");
    }

    #[test]
    fn test_fill_empty_keeps_existing_values() {
        let fields = FieldNames::default();
        let item = WorkItem::new("I")
            .with_due_date(date("2025-03-10"))
            .with_estimate("3 days")
            .with_size(SelectOption::new("S_tiny", "Tiny"))
            .with_week(Iteration::new("W_10", "Week 10", date("2025-03-03"), 7));
        let rec = Reconciler::new(&fields, UpdatePolicy::FillEmpty)
            .reconcile(&item, &schema())
            .unwrap();
        assert_eq!(rec.updates, vec![FieldUpdate::new("F_release", FieldKind::SingleSelect, "R_1")]);
    }

    #[test]
    fn test_fill_empty_falls_back_to_preceding_week() {
        let fields = FieldNames::default();
        let item = WorkItem::new("I").with_due_date(date("2025-03-20"));
        let rec = Reconciler::new(&fields, UpdatePolicy::FillEmpty)
            .reconcile(&item, &schema())
            .unwrap();
        assert_eq!(rec.updates[0], FieldUpdate::new("F_week", FieldKind::Iteration, "W_11"));

        let rec = overwrite(&fields).reconcile(&item, &schema()).unwrap();
        assert!(rec.updates.iter().all(|u| u.kind != FieldKind::Iteration));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("overwrite".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::Overwrite);
        assert_eq!("fill-empty".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::FillEmpty);
        assert!("sometimes".parse::<UpdatePolicy>().is_err());
    }
}
