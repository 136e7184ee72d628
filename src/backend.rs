//! The seam between the sync loop and wherever project data lives.

use crate::error::Result;
use crate::model::{FieldUpdate, ProjectSchema, WorkItem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Only items whose issue is open.
    pub open_only: bool,
}

impl ItemFilter {
    pub fn matches(&self, item: &WorkItem) -> bool {
        !self.open_only || item.is_open()
    }
}

/// Source of project schema and items, and sink for field writes and comments.
pub trait ProjectBackend {
    fn project_schema(&self) -> Result<ProjectSchema>;

    fn project_items(&self, filter: ItemFilter) -> Result<Vec<WorkItem>>;

    fn update_item_fields(
        &self,
        project_id: &str,
        item_id: &str,
        updates: &[FieldUpdate],
    ) -> Result<()>;

    fn add_comment(&self, subject_id: &str, body: &str) -> Result<()>;
}
