//! Date and duration matchers.
//!
//! Pure functions that place a due date into an iteration or release window
//! and an effort estimate into a size bucket. Nothing here performs I/O.
//!
//! - [`resolve_iteration`] / [`resolve_preceding_iteration`]: week lookup
//! - [`resolve_release`] / [`parse_release_window`]: release lookup
//! - [`classify`]: size lookup

mod iteration;
mod release;
mod size;
mod window;

pub use iteration::{resolve_iteration, resolve_preceding_iteration};
pub use release::{WindowError, parse_release_window, resolve_release};
pub use size::{DurationUnit, SizeBucket, classify, estimate_hours};
pub use window::DateWindow;
