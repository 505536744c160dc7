//! View coordinator for the attraction directory.
//!
//! Owns the single mutable [`AppState`] aggregate and the transitions user
//! actions trigger: initial load, load-more, keyword search, and retry.
//! Displays observe state through [`ViewSnapshot`]s published on a watch
//! channel and never mutate it themselves.

pub mod coordinator;
pub mod filter;
pub mod snapshot;
pub mod source;
pub mod state;

pub use coordinator::{LoadMode, PageTicket, ViewCoordinator};
pub use snapshot::ViewSnapshot;
pub use source::PageSource;
pub use state::{AppState, Status, PAGE_SIZE_THRESHOLD};
