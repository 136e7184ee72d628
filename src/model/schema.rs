use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::update::FieldKind;
use crate::matcher::DateWindow;

/// One option of a single-select field, e.g. a release or a size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A fixed-length calendar interval configured on an iteration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub duration: u32,
}

impl Iteration {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: NaiveDate,
        duration: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date,
            duration,
        }
    }

    /// Last day covered by this iteration, inclusive.
    ///
    /// `None` for a zero-length iteration.
    pub fn end_date(&self) -> Option<NaiveDate> {
        let extra = self.duration.checked_sub(1)?;
        self.start_date.checked_add_days(Days::new(u64::from(extra)))
    }

    pub fn window(&self) -> Option<DateWindow> {
        DateWindow::new(self.start_date, self.end_date()?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.window().is_some_and(|w| w.contains(date))
    }
}

/// Upcoming and completed iterations as the tracker reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationConfig {
    #[serde(default)]
    pub iterations: Vec<Iteration>,

    #[serde(default)]
    pub completed_iterations: Vec<Iteration>,
}

impl IterationConfig {
    /// Upcoming iterations followed by completed ones.
    pub fn all(&self) -> impl Iterator<Item = &Iteration> {
        self.iterations.iter().chain(self.completed_iterations.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConfig {
    SingleSelect { options: Vec<SelectOption> },
    Iteration(IterationConfig),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,

    #[serde(flatten)]
    pub config: FieldConfig,
}

impl FieldDefinition {
    pub fn single_select(
        id: impl Into<String>,
        name: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config: FieldConfig::SingleSelect { options },
        }
    }

    pub fn iteration(
        id: impl Into<String>,
        name: impl Into<String>,
        iterations: Vec<Iteration>,
        completed_iterations: Vec<Iteration>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config: FieldConfig::Iteration(IterationConfig {
                iterations,
                completed_iterations,
            }),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self.config {
            FieldConfig::SingleSelect { .. } => FieldKind::SingleSelect,
            FieldConfig::Iteration(_) => FieldKind::Iteration,
        }
    }

    pub fn options(&self) -> Option<&[SelectOption]> {
        match &self.config {
            FieldConfig::SingleSelect { options } => Some(options),
            FieldConfig::Iteration(_) => None,
        }
    }

    pub fn iterations(&self) -> Option<&IterationConfig> {
        match &self.config {
            FieldConfig::Iteration(config) => Some(config),
            FieldConfig::SingleSelect { .. } => None,
        }
    }
}

/// Snapshot of a project's field layout taken at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSchema {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl ProjectSchema {
    pub fn new(id: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            id: id.into(),
            title: None,
            fields,
        }
    }

    /// Looks a field up by its display name. Names are matched exactly.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_iteration_end_date_is_inclusive() {
        let week = Iteration::new("it-1", "Week 10", date("2025-03-10"), 7);
        assert_eq!(week.end_date(), Some(date("2025-03-16")));
        assert!(week.contains(date("2025-03-16")));
        assert!(!week.contains(date("2025-03-17")));
    }

    #[test]
    fn test_zero_length_iteration_contains_nothing() {
        let week = Iteration::new("it-0", "Empty", date("2025-03-10"), 0);
        assert_eq!(week.end_date(), None);
        assert!(!week.contains(date("2025-03-10")));
    }

    #[test]
    fn test_iteration_config_merges_upcoming_then_completed() {
        let config = IterationConfig {
            iterations: vec![Iteration::new("b", "B", date("2025-03-17"), 7)],
            completed_iterations: vec![Iteration::new("a", "A", date("2025-03-10"), 7)],
        };
        let ids: Vec<_> = config.all().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_field_definition_json_shape() {
        let field = FieldDefinition::single_select("f1", "Size", vec![SelectOption::new("o1", "Tiny")]);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "single_select");
        assert_eq!(json["options"][0]["name"], "Tiny");

        let back: FieldDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_iteration_field_deserializes_camel_case() {
        let json = serde_json::json!({
            "id": "f2",
            "name": "Week",
            "kind": "iteration",
            "iterations": [
                { "id": "i1", "title": "Week 1", "startDate": "2025-01-06", "duration": 7 }
            ],
            "completedIterations": []
        });
        let field: FieldDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(field.kind(), FieldKind::Iteration);
        let config = field.iterations().unwrap();
        assert_eq!(config.iterations[0].start_date, date("2025-01-06"));
        assert!(field.options().is_none());
    }

    #[test]
    fn test_schema_field_lookup_is_exact() {
        let schema = ProjectSchema::new(
            "p1",
            vec![FieldDefinition::single_select("f1", "Release", vec![])],
        );
        assert!(schema.field("Release").is_some());
        assert!(schema.field("release").is_none());
    }
}
