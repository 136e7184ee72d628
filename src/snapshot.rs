//! Offline project data.
//!
//! A snapshot is a JSON file holding a project schema and its items, as
//! written by `projsync snapshot`. [`SnapshotBackend`] serves it through
//! [`ProjectBackend`] and keeps writes in memory instead of sending them.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;

use crate::backend::{ItemFilter, ProjectBackend};
use crate::error::Result;
use crate::model::{FieldUpdate, ProjectSchema, WorkItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema: ProjectSchema,

    #[serde(default)]
    pub items: Vec<WorkItem>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedWrite {
    Fields {
        project_id: String,
        item_id: String,
        updates: Vec<FieldUpdate>,
    },
    Comment {
        subject_id: String,
        body: String,
    },
}

pub struct SnapshotBackend {
    snapshot: Snapshot,
    writes: RefCell<Vec<RecordedWrite>>,
}

impl SnapshotBackend {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            writes: RefCell::new(Vec::new()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(Snapshot::load(path)?))
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.borrow().clone()
    }
}

impl ProjectBackend for SnapshotBackend {
    fn project_schema(&self) -> Result<ProjectSchema> {
        Ok(self.snapshot.schema.clone())
    }

    fn project_items(&self, filter: ItemFilter) -> Result<Vec<WorkItem>> {
        Ok(self
            .snapshot
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    fn update_item_fields(
        &self,
        project_id: &str,
        item_id: &str,
        updates: &[FieldUpdate],
    ) -> Result<()> {
        self.writes.borrow_mut().push(RecordedWrite::Fields {
            project_id: project_id.to_string(),
            item_id: item_id.to_string(),
            updates: updates.to_vec(),
        });
        Ok(())
    }

    fn add_comment(&self, subject_id: &str, body: &str) -> Result<()> {
        self.writes.borrow_mut().push(RecordedWrite::Comment {
            subject_id: subject_id.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldKind, ItemContent};
    use tempfile::TempDir;

    fn item(id: &str, state: &str) -> WorkItem {
        WorkItem::new(id).with_content(ItemContent {
            id: format!("I_{}", id),
            state: Some(state.to_string()),
            ..ItemContent::default()
        })
    }

    fn backend() -> SnapshotBackend {
        SnapshotBackend::new(Snapshot {
            schema: ProjectSchema::new("PVT_1", vec![]),
            items: vec![item("a", "OPEN"), item("b", "CLOSED")],
        })
    }

    #[test]
    fn test_open_only_filter() {
        let backend = backend();
        let open = backend.project_items(ItemFilter { open_only: true }).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, "a");
        assert_eq!(backend.project_items(ItemFilter::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_writes_are_recorded_in_order() {
        let backend = backend();
        let updates = vec![FieldUpdate::new("F", FieldKind::SingleSelect, "O")];
        backend.update_item_fields("PVT_1", "a", &updates).unwrap();
        backend.add_comment("I_a", "hello").unwrap();

        let writes = backend.writes();
        assert_eq!(writes.len(), 2);
        assert!(matches!(&writes[0], RecordedWrite::Fields { item_id, .. } if item_id == "a"));
        assert!(matches!(&writes[1], RecordedWrite::Comment { body, .. } if body == "hello"));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshot.json");
        let snapshot = Snapshot {
            schema: ProjectSchema::new("PVT_1", vec![]),
            items: vec![item("a", "OPEN")],
        };
        snapshot.save(&path).unwrap();
        assert_eq!(Snapshot::load(&path).unwrap(), snapshot);
    }
}
