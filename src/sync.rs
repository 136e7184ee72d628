use serde::Serialize;

use crate::backend::{ItemFilter, ProjectBackend};
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::model::{ChangeSummary, FieldUpdate, WorkItem};
use crate::reconcile::Reconciler;

/// Outcome for a single item that needed changes.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub item_id: String,
    pub url: String,
    pub updates: Vec<FieldUpdate>,
    pub changes: ChangeSummary,
    pub applied: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Set when the fields were written but the comment was not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub dry_run: bool,
    pub scanned: usize,
    pub changed: usize,
    pub applied: usize,
    pub failed: usize,
    pub comments_failed: usize,
    pub items: Vec<ItemReport>,
}

pub struct Syncer<'a> {
    project: &'a ProjectConfig,
    dry_run: bool,
}

impl<'a> Syncer<'a> {
    pub fn new(project: &'a ProjectConfig, dry_run: bool) -> Self {
        Self { project, dry_run }
    }

    /// Reconciles every item the backend returns and writes back the changes.
    ///
    /// A failed write is recorded on the item's report and the run moves on.
    /// Schema problems (a required field missing) abort the run.
    pub fn run<B: ProjectBackend + ?Sized>(&self, backend: &B) -> Result<SyncReport> {
        tracing::info!(policy = %self.project.sync.policy, "Sync started");
        if self.dry_run {
            tracing::info!("Dry run: no fields will be written");
        }

        let schema = backend.project_schema()?;
        let filter = ItemFilter {
            open_only: self.project.sync.open_only,
        };
        let items = backend.project_items(filter)?;

        let mut report = SyncReport {
            dry_run: self.dry_run,
            scanned: items.len(),
            ..SyncReport::default()
        };

        if items.is_empty() {
            tracing::info!("No items found");
            return Ok(report);
        }

        let reconciler = Reconciler::new(&self.project.fields, self.project.sync.policy);
        for item in &items {
            let rec = reconciler.reconcile(item, &schema)?;
            if rec.is_empty() {
                continue;
            }

            let mut item_report = ItemReport {
                item_id: item.id.clone(),
                url: item.display_url().to_string(),
                updates: rec.updates,
                changes: rec.summary,
                applied: false,
                error: None,
                comment_error: None,
            };
            report.changed += 1;

            if !self.dry_run {
                match backend.update_item_fields(&schema.id, &item.id, &item_report.updates) {
                    Ok(()) => {
                        item_report.applied = true;
                        report.applied += 1;
                        if let Err(e) = self.notify(backend, item, &item_report.changes) {
                            tracing::warn!(item = %item.id, error = %e, "Fields updated but comment failed");
                            item_report.comment_error = Some(e.to_string());
                            report.comments_failed += 1;
                        }
                    }
                    Err(e) => {
                        tracing::error!(item = %item.id, error = %e, "Failed to update item");
                        item_report.error = Some(e.to_string());
                        report.failed += 1;
                    }
                }
            }

            tracing::info!(
                item = %item_report.url,
                changes = %describe(&item_report.changes),
                dry_run = self.dry_run,
                "Item fields reconciled"
            );
            report.items.push(item_report);
        }

        tracing::info!(
            scanned = report.scanned,
            changed = report.changed,
            applied = report.applied,
            failed = report.failed,
            comments_failed = report.comments_failed,
            "Sync finished"
        );
        Ok(report)
    }

    /// Posts the change summary on the item's issue, when enabled and possible.
    fn notify<B: ProjectBackend + ?Sized>(
        &self,
        backend: &B,
        item: &WorkItem,
        changes: &ChangeSummary,
    ) -> Result<()> {
        if !self.project.sync.comment {
            return Ok(());
        }
        match item.comment_target() {
            Some(subject) => {
                let body = changes.render_comment(&self.project.sync.comment_header);
                backend.add_comment(subject, &body)
            }
            None => {
                tracing::debug!(item = %item.id, "Item has no issue to comment on");
                Ok(())
            }
        }
    }
}

fn describe(changes: &ChangeSummary) -> String {
    changes
        .entries()
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
