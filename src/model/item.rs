use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schema::{Iteration, SelectOption};

/// The issue or pull request a project item points at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemContent {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A project item together with the field values relevant to scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<Iteration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<SelectOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SelectOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ItemContent>,
}

impl WorkItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            due_date: None,
            week: None,
            release: None,
            estimate: None,
            size: None,
            content: None,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimate = Some(estimate.into());
        self
    }

    pub fn with_week(mut self, week: Iteration) -> Self {
        self.week = Some(week);
        self
    }

    pub fn with_release(mut self, release: SelectOption) -> Self {
        self.release = Some(release);
        self
    }

    pub fn with_size(mut self, size: SelectOption) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_content(mut self, content: ItemContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Open issues only; draft items have no state and count as closed.
    pub fn is_open(&self) -> bool {
        self.content
            .as_ref()
            .and_then(|c| c.state.as_deref())
            .is_some_and(|s| s.eq_ignore_ascii_case("OPEN"))
    }

    /// Node id that change notifications are posted on.
    pub fn comment_target(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.id.as_str())
    }

    pub fn display_url(&self) -> &str {
        self.content
            .as_ref()
            .and_then(|c| c.url.as_deref())
            .unwrap_or(&self.id)
    }
}
