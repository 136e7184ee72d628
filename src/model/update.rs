use serde::{Deserialize, Serialize};
use std::fmt;

/// How a field's value is addressed when writing it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    SingleSelect,
    Iteration,
}

impl FieldKind {
    /// Key of the value object in `updateProjectV2ItemFieldValue`.
    pub fn value_key(self) -> &'static str {
        match self {
            FieldKind::SingleSelect => "singleSelectOptionId",
            FieldKind::Iteration => "iterationId",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::SingleSelect => write!(f, "single_select"),
            FieldKind::Iteration => write!(f, "iteration"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub field_id: String,
    pub kind: FieldKind,
    pub value_id: String,
}

impl FieldUpdate {
    pub fn new(field_id: impl Into<String>, kind: FieldKind, value_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            kind,
            value_id: value_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub field: String,
    pub value: String,
}

impl fmt::Display for SummaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.value)
    }
}

/// Human-readable list of changed fields, one entry per update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSummary(Vec<SummaryEntry>);

impl ChangeSummary {
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.push(SummaryEntry {
            field: field.into(),
            value: value.into(),
        });
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Markdown body of the notification comment.
    pub fn render_comment(&self, header: &str) -> String {
        let lines: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("- {}: **{}**", e.field, e.value))
            .collect();
        format!("{}\n{}", header, lines.join("\n"))
    }
}

/// Result of reconciling one item: what to write and how to describe it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub updates: Vec<FieldUpdate>,
    pub summary: ChangeSummary,
}

impl Reconciliation {
    pub fn push(&mut self, update: FieldUpdate, field: &str, value: &str) {
        self.updates.push(update);
        self.summary.push(field, value);
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}
