use taipei_core::Attraction;

use crate::filter;
use crate::state::{AppState, Status};

/// Read-only view of [`AppState`] handed to the display.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// Accumulated attractions after keyword filtering.
    pub visible: Vec<Attraction>,
    pub status: Status,
    pub error_message: String,
    pub has_more: bool,
    pub keyword: String,
    pub page: u32,
    /// Accumulated count before filtering.
    pub loaded: usize,
    pub reported_total: u64,
}

impl ViewSnapshot {
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        Self {
            visible: filter::visible(&state.attractions, &state.keyword)
                .into_iter()
                .cloned()
                .collect(),
            status: state.status,
            error_message: state.error_message.clone(),
            has_more: state.has_more,
            keyword: state.keyword.clone(),
            page: state.page,
            loaded: state.attractions.len(),
            reported_total: state.reported_total,
        }
    }

    /// The load-more control is offered only for an unfiltered, settled list.
    #[must_use]
    pub fn show_load_more(&self) -> bool {
        self.status == Status::Success && self.has_more && self.keyword.trim().is_empty()
    }

    /// Nothing to show: either the first page was empty or the keyword
    /// filtered everything out.
    #[must_use]
    pub fn show_empty_notice(&self) -> bool {
        self.status == Status::Empty || (self.status == Status::Success && self.visible.is_empty())
    }
}
