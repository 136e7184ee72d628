//! GraphQL documents sent to the GitHub API.

use crate::config::{FieldNames, OwnerType};

pub const ITEMS_PAGE_SIZE: u32 = 100;

pub fn project_schema(owner_type: OwnerType) -> String {
    format!(
        r#"
query($owner: String!, $projectNumber: Int!) {{
  owner: {owner_type}(login: $owner) {{
    projectV2(number: $projectNumber) {{
      id
      title
      fields(first: 100) {{
        nodes {{
          ... on ProjectV2SingleSelectField {{
            id
            name
            options {{ id name }}
          }}
          ... on ProjectV2IterationField {{
            id
            name
            configuration {{
              iterations {{ id title startDate duration }}
              completedIterations {{ id title startDate duration }}
            }}
          }}
        }}
      }}
    }}
  }}
}}
"#
    )
}

/// Items query; field values are looked up by the configured display names.
pub fn project_items(owner_type: OwnerType, fields: &FieldNames) -> String {
    format!(
        r#"
query($owner: String!, $projectNumber: Int!, $after: String) {{
  owner: {owner_type}(login: $owner) {{
    projectV2(number: $projectNumber) {{
      items(first: {ITEMS_PAGE_SIZE}, after: $after) {{
        nodes {{
          id
          dueDate: fieldValueByName(name: {due_date}) {{
            ... on ProjectV2ItemFieldDateValue {{ date }}
          }}
          release: fieldValueByName(name: {release}) {{
            ... on ProjectV2ItemFieldSingleSelectValue {{ id: optionId name }}
          }}
          week: fieldValueByName(name: {week}) {{
            ... on ProjectV2ItemFieldIterationValue {{ id: iterationId title startDate duration }}
          }}
          estimate: fieldValueByName(name: {estimate}) {{
            ... on ProjectV2ItemFieldSingleSelectValue {{ id: optionId name }}
            ... on ProjectV2ItemFieldTextValue {{ text }}
          }}
          size: fieldValueByName(name: {size}) {{
            ... on ProjectV2ItemFieldSingleSelectValue {{ id: optionId name }}
          }}
          content {{
            ... on Issue {{ id title number state url }}
          }}
        }}
        pageInfo {{ endCursor hasNextPage }}
        totalCount
      }}
    }}
  }}
}}
"#,
        due_date = quote(&fields.due_date),
        release = quote(&fields.release),
        week = quote(&fields.week),
        estimate = quote(&fields.estimate),
        size = quote(&fields.size),
    )
}

pub const UPDATE_FIELD_VALUE_PAYLOAD: &str = "updateProjectV2ItemFieldValue";

pub const UPDATE_FIELD_VALUE: &str = r#"
mutation($input: UpdateProjectV2ItemFieldValueInput!) {
  updateProjectV2ItemFieldValue(input: $input) {
    projectV2Item { id }
  }
}
"#;

pub const ADD_COMMENT_PAYLOAD: &str = "addComment";

pub const ADD_COMMENT: &str = r#"
mutation($subjectId: ID!, $body: String!) {
  addComment(input: { subjectId: $subjectId, body: $body }) {
    clientMutationId
  }
}
"#;

/// Renders a GraphQL string literal.
fn quote(value: &str) -> String {
    // JSON string escaping is a subset of what GraphQL accepts
    serde_json::Value::String(value.to_string()).to_string()
}
