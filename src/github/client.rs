use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use url::Url;

use super::queries;
use super::wire::{
    FieldNode, GraphQlResponse, ItemsProject, OwnerData, SchemaProject, join_errors,
};
use crate::backend::{ItemFilter, ProjectBackend};
use crate::config::{ApiSettings, FieldNames, ProjectTarget};
use crate::error::{Result, SyncError};
use crate::model::{FieldUpdate, ProjectSchema, WorkItem};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Blocking GitHub GraphQL client bound to one project.
pub struct GitHubClient {
    http: reqwest::blocking::Client,
    endpoint: Url,
    token: String,
    target: ProjectTarget,
    fields: FieldNames,
}

impl GitHubClient {
    pub fn new(api: &ApiSettings, target: ProjectTarget, fields: FieldNames) -> Result<Self> {
        // reqwest is built without a default crypto provider; a second
        // install attempt fails harmlessly
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("projsync/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            endpoint: api.endpoint.clone(),
            token: api.token().to_string(),
            target,
            fields,
        })
    }

    fn variables(&self, after: Option<&str>) -> serde_json::Value {
        let mut variables = json!({
            "owner": self.target.owner,
            "projectNumber": self.target.number,
        });
        if let Some(cursor) = after {
            variables["after"] = json!(cursor);
        }
        variables
    }

    fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse<T>> {
        let response = self
            .http
            .post(self.endpoint.as_str())
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SyncError::HttpStatus(status.as_u16(), body));
        }
        Ok(response.json::<GraphQlResponse<T>>()?)
    }

    /// Runs a query and returns its data. Errors alongside data are logged.
    fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let response = self.execute::<T>(query, variables)?;
        match response.data {
            Some(data) => {
                if !response.errors.is_empty() {
                    tracing::warn!(errors = %join_errors(&response.errors), "GraphQL query returned partial data");
                }
                Ok(data)
            }
            None if response.errors.is_empty() => {
                Err(SyncError::Api("response contained no data".to_string()))
            }
            None => Err(SyncError::Api(join_errors(&response.errors))),
        }
    }

    /// Runs a mutation whose result lives under `payload` in the response data.
    fn mutate(&self, query: &str, payload: &str, variables: serde_json::Value) -> Result<()> {
        let response = self.execute::<serde_json::Value>(query, variables)?;
        mutation_outcome(response, payload)
    }

    fn not_found(&self) -> SyncError {
        SyncError::Api(format!(
            "project #{} not found for {} '{}'",
            self.target.number, self.target.owner_type, self.target.owner
        ))
    }
}

/// A mutation succeeded only if its payload came back non-null. GitHub rejects
/// writes (missing permissions, bad ids) with HTTP 200 and an `errors` array.
fn mutation_outcome(response: GraphQlResponse<serde_json::Value>, payload: &str) -> Result<()> {
    let applied = response
        .data
        .as_ref()
        .and_then(|data| data.get(payload))
        .is_some_and(|value| !value.is_null());

    match (applied, response.errors.is_empty()) {
        (true, true) => Ok(()),
        (true, false) => {
            tracing::warn!(errors = %join_errors(&response.errors), "GraphQL mutation reported errors");
            Ok(())
        }
        (false, true) => Err(SyncError::Api(format!("{} returned no result", payload))),
        (false, false) => Err(SyncError::Api(join_errors(&response.errors))),
    }
}

impl ProjectBackend for GitHubClient {
    fn project_schema(&self) -> Result<ProjectSchema> {
        let data: OwnerData<SchemaProject> = self.query(
            &queries::project_schema(self.target.owner_type),
            self.variables(None),
        )?;
        let project = data
            .owner
            .and_then(|o| o.project)
            .ok_or_else(|| self.not_found())?;

        let fields = project
            .fields
            .nodes
            .into_iter()
            .flatten()
            .filter_map(FieldNode::into_definition)
            .collect();

        Ok(ProjectSchema {
            id: project.id,
            title: project.title,
            fields,
        })
    }

    fn project_items(&self, filter: ItemFilter) -> Result<Vec<WorkItem>> {
        let query = queries::project_items(self.target.owner_type, &self.fields);
        let mut items = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let data: OwnerData<ItemsProject> = self.query(&query, self.variables(after.as_deref()))?;
            let page = data
                .owner
                .and_then(|o| o.project)
                .ok_or_else(|| self.not_found())?
                .items;

            tracing::debug!(
                fetched = page.nodes.len(),
                total = ?page.total_count,
                "Fetched project items page"
            );

            items.extend(
                page.nodes
                    .into_iter()
                    .flatten()
                    .map(WorkItem::from)
                    .filter(|item| filter.matches(item)),
            );

            match page.page_info.end_cursor {
                Some(cursor) if page.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }

        Ok(items)
    }

    fn update_item_fields(
        &self,
        project_id: &str,
        item_id: &str,
        updates: &[FieldUpdate],
    ) -> Result<()> {
        for update in updates {
            let mut value = serde_json::Map::new();
            value.insert(update.kind.value_key().to_string(), json!(update.value_id));

            let variables = json!({
                "input": {
                    "projectId": project_id,
                    "itemId": item_id,
                    "fieldId": update.field_id,
                    "value": value,
                }
            });
            tracing::debug!(item = item_id, field = %update.field_id, kind = %update.kind, "Updating field");
            self.mutate(
                queries::UPDATE_FIELD_VALUE,
                queries::UPDATE_FIELD_VALUE_PAYLOAD,
                variables,
            )?;
        }
        Ok(())
    }

    fn add_comment(&self, subject_id: &str, body: &str) -> Result<()> {
        self.mutate(
            queries::ADD_COMMENT,
            queries::ADD_COMMENT_PAYLOAD,
            json!({ "subjectId": subject_id, "body": body }),
        )
    }
}
