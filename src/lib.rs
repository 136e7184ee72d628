//! # projsync - scheduling fields for GitHub Projects
//!
//! projsync fills in the **Week**, **Release** and **Size** fields of GitHub
//! Project items from their **Due Date** and **Estimate**. It is meant to run
//! on a schedule (for example as a GitHub Action) and posts a comment on each
//! issue it changes.
//!
//! ## How values are resolved
//!
//! - **Week**: the iteration whose days include the due date
//! - **Release**: the option whose name (`"Mar 3 - Mar 14 (v2.1)"`) covers the due date
//! - **Size**: the bucket the estimate falls in after converting it to hours
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a config file with the default field names
//! projsync init
//!
//! # See what would change
//! projsync sync --owner acme --project 7 --token "$GH_TOKEN" --dry-run
//!
//! # Work offline against an exported snapshot
//! projsync snapshot --owner acme --project 7 --token "$GH_TOKEN" project.json
//! projsync plan project.json
//! ```
//!
//! ## Modules
//!
//! - [`matcher`]: Pure date-window and size matchers
//! - [`reconcile`]: Turns matcher output into field updates
//! - [`sync`]: Runs reconciliation over a whole project
//! - [`github`]: GitHub GraphQL backend
//! - [`snapshot`]: Offline JSON backend
//! - [`config`]: Configuration loading

/// Project data source and sink abstraction.
pub mod backend;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.projsync.toml` files and the immutable per-run [`config::SyncConfig`].
pub mod config;

/// Error types and result aliases.
///
/// Defines `SyncError` enum and `Result<T>` type alias.
pub mod error;

/// GitHub Projects v2 GraphQL client.
pub mod github;

pub mod logging;

/// Iteration, release and size matchers.
pub mod matcher;

/// Data models for projects, items and updates.
pub mod model;

/// Reconciliation of one item against the project schema.
pub mod reconcile;

pub mod snapshot;

/// Whole-project sync loop.
pub mod sync;
