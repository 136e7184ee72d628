//! Response shapes of the GitHub GraphQL API.
//!
//! Union members that do not match a fragment come back as `{}`, and unset
//! field values come back as `null`, so almost everything here is optional.
//! Conversion into [`crate::model`] types drops incomplete nodes.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{FieldDefinition, ItemContent, Iteration, IterationConfig, SelectOption, WorkItem};

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

pub fn join_errors(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Deserialize)]
pub struct OwnerData<P> {
    pub owner: Option<OwnerNode<P>>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerNode<P> {
    #[serde(rename = "projectV2")]
    pub project: Option<P>,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaProject {
    pub id: String,
    pub title: Option<String>,
    pub fields: Connection<FieldNode>,
}

#[derive(Debug, Deserialize)]
pub struct FieldNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub options: Option<Vec<SelectOption>>,
    pub configuration: Option<IterationConfig>,
}

impl FieldNode {
    /// `None` for field types the schema query has no fragment for.
    pub fn into_definition(self) -> Option<FieldDefinition> {
        let id = self.id?;
        let name = self.name?;
        if let Some(options) = self.options {
            return Some(FieldDefinition::single_select(id, name, options));
        }
        let config = self.configuration?;
        Some(FieldDefinition::iteration(
            id,
            name,
            config.iterations,
            config.completed_iterations,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct ItemsProject {
    pub items: ItemsConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsConnection {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<ItemNode>>,
    pub page_info: PageInfo,
    pub total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemNode {
    pub id: String,
    pub due_date: Option<DateValue>,
    pub release: Option<OptionValue>,
    pub week: Option<IterationValue>,
    pub estimate: Option<OptionValue>,
    pub size: Option<OptionValue>,
    pub content: Option<ContentNode>,
}

#[derive(Debug, Deserialize)]
pub struct DateValue {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct OptionValue {
    pub id: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
}

impl OptionValue {
    fn into_option(self) -> Option<SelectOption> {
        Some(SelectOption::new(self.id?, self.name?))
    }

    /// Estimates may live in a single-select or a plain text field.
    fn into_text(self) -> Option<String> {
        self.name.or(self.text).filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationValue {
    pub id: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<u32>,
}

impl IterationValue {
    fn into_iteration(self) -> Option<Iteration> {
        Some(Iteration::new(self.id?, self.title?, self.start_date?, self.duration?))
    }
}

#[derive(Debug, Deserialize)]
pub struct ContentNode {
    pub id: Option<String>,
    pub title: Option<String>,
    pub number: Option<u64>,
    pub state: Option<String>,
    pub url: Option<String>,
}

impl ContentNode {
    fn into_content(self) -> Option<ItemContent> {
        Some(ItemContent {
            id: self.id?,
            title: self.title,
            number: self.number,
            state: self.state,
            url: self.url,
        })
    }
}

impl From<ItemNode> for WorkItem {
    fn from(node: ItemNode) -> Self {
        WorkItem {
            id: node.id,
            due_date: node.due_date.and_then(|d| d.date),
            week: node.week.and_then(IterationValue::into_iteration),
            release: node.release.and_then(OptionValue::into_option),
            estimate: node.estimate.and_then(OptionValue::into_text),
            size: node.size.and_then(OptionValue::into_option),
            content: node.content.and_then(ContentNode::into_content),
        }
    }
}
