//! GitHub Projects (v2) backend.
//!
//! Talks to the GraphQL API with a blocking `reqwest` client: one query for
//! the project's fields, a paginated query for its items, and one mutation
//! per field update plus one for the notification comment.

mod client;
mod queries;
mod wire;

pub use client::GitHubClient;
