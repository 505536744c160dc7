//! Pagination, search, and status coordination.
//!
//! | From                 | Trigger                     | To      |
//! |----------------------|-----------------------------|---------|
//! | any                  | `load_initial`              | Loading |
//! | anything but Loading | `retry`                     | Loading |
//! | Success              | `load_more` (has more)      | Loading |
//! | Loading              | fresh page, no records      | Empty   |
//! | Loading              | fresh or load-more page     | Success |
//! | Loading              | fetch failed                | Error   |
//!
//! Every request is issued under a [`PageTicket`]. A fresh load starts a new
//! generation, so a response still in flight from an older generation is
//! dropped instead of overwriting newer state.

use taipei_client::FetchError;
use taipei_core::{Attraction, PageResult};
use tokio::sync::watch;

use crate::filter;
use crate::snapshot::ViewSnapshot;
use crate::source::PageSource;
use crate::state::{AppState, Status, PAGE_SIZE_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Discard accumulated results and start from page 1.
    Fresh,
    /// Append the next page to accumulated results.
    More,
}

/// Identifies one outstanding page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    generation: u64,
    page: u32,
    mode: LoadMode,
}

impl PageTicket {
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn mode(&self) -> LoadMode {
        self.mode
    }
}

/// Owns [`AppState`] and applies user actions to it.
///
/// The async operations ([`load_initial`](Self::load_initial),
/// [`load_more`](Self::load_more), [`retry`](Self::retry)) run a whole
/// request to completion. Drivers that fetch on their own schedule can use
/// the `begin_*` methods, [`fetch`](Self::fetch), and [`apply`](Self::apply)
/// separately.
pub struct ViewCoordinator<S> {
    source: S,
    language: String,
    state: AppState,
    generation: u64,
    in_flight: Option<PageTicket>,
    snapshots: watch::Sender<ViewSnapshot>,
}

impl<S: PageSource> ViewCoordinator<S> {
    pub fn new(source: S, language: impl Into<String>) -> Self {
        let state = AppState::default();
        let (snapshots, _) = watch::channel(ViewSnapshot::from_state(&state));
        Self {
            source,
            language: language.into(),
            state,
            generation: 0,
            in_flight: None,
            snapshots,
        }
    }

    /// Receiver that observes a fresh [`ViewSnapshot`] after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot::from_state(&self.state)
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.state.status
    }

    #[must_use]
    pub fn attractions(&self) -> &[Attraction] {
        &self.state.attractions
    }

    /// Accumulated attractions matching the current keyword.
    #[must_use]
    pub fn visible(&self) -> Vec<&Attraction> {
        filter::visible(&self.state.attractions, &self.state.keyword)
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.state.error_message
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.state.page
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.state.keyword
    }

    /// Fresh load from page 1. Always accepted; supersedes anything in flight.
    pub async fn load_initial(&mut self) {
        let ticket = self.begin_initial();
        let result = self.fetch(ticket).await;
        self.apply(ticket, result);
    }

    /// Fetches and appends the next page. Returns `false` without touching
    /// state or the network while loading, when no more pages exist, or when
    /// the last load did not succeed.
    pub async fn load_more(&mut self) -> bool {
        let Some(ticket) = self.begin_more() else {
            return false;
        };
        let result = self.fetch(ticket).await;
        self.apply(ticket, result);
        true
    }

    /// Fresh load from page 1, rejected while a request is in flight.
    pub async fn retry(&mut self) -> bool {
        let Some(ticket) = self.begin_retry() else {
            return false;
        };
        let result = self.fetch(ticket).await;
        self.apply(ticket, result);
        true
    }

    /// Updates the search text. Never fetches and never touches the
    /// accumulated list or status.
    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        if keyword == self.state.keyword {
            return;
        }
        self.state.keyword = keyword;
        tracing::debug!(
            keyword = %self.state.keyword,
            visible = self.visible().len(),
            "keyword changed"
        );
        self.publish();
    }

    /// Resets accumulated state and enters Loading for page 1.
    pub fn begin_initial(&mut self) -> PageTicket {
        if let Some(stale) = self.in_flight {
            tracing::debug!(
                page = stale.page,
                generation = stale.generation,
                "fresh load supersedes request in flight"
            );
        }
        self.generation += 1;
        self.state.attractions.clear();
        self.state.page = 1;
        self.state.has_more = true;
        self.state.reported_total = 0;
        self.state.status = Status::Loading;
        self.issue(LoadMode::Fresh)
    }

    /// Like [`begin_initial`](Self::begin_initial), but `None` while loading.
    pub fn begin_retry(&mut self) -> Option<PageTicket> {
        if self.state.status == Status::Loading {
            tracing::debug!("retry ignored while loading");
            return None;
        }
        Some(self.begin_initial())
    }

    /// Advances the page cursor and enters Loading. Returns `None` unless the
    /// last load succeeded and more pages may exist; in particular while
    /// loading and once a short page has been seen.
    pub fn begin_more(&mut self) -> Option<PageTicket> {
        if self.state.status != Status::Success || !self.state.has_more {
            return None;
        }
        self.state.page += 1;
        self.state.status = Status::Loading;
        Some(self.issue(LoadMode::More))
    }

    /// Requests the ticket's page from the source.
    ///
    /// # Errors
    ///
    /// Propagates the source's [`FetchError`]; hand it to
    /// [`apply`](Self::apply) rather than to the display.
    pub async fn fetch(&self, ticket: PageTicket) -> Result<PageResult, FetchError> {
        self.source.fetch_page(&self.language, ticket.page).await
    }

    /// Merges a response into state. Returns `false` and changes nothing
    /// when `ticket` is not the request currently in flight.
    pub fn apply(&mut self, ticket: PageTicket, result: Result<PageResult, FetchError>) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                page = ticket.page,
                generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale page response"
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(page) => self.merge(ticket, page),
            Err(err) => {
                tracing::warn!(
                    page = ticket.page,
                    mode = ?ticket.mode,
                    error = ?err,
                    "page load failed"
                );
                self.state.error_message = err.to_string();
                self.state.status = Status::Error;
            }
        }
        self.publish();
        true
    }

    fn issue(&mut self, mode: LoadMode) -> PageTicket {
        let ticket = PageTicket {
            generation: self.generation,
            page: self.state.page,
            mode,
        };
        self.in_flight = Some(ticket);
        tracing::debug!(page = ticket.page, ?mode, "page request issued");
        self.publish();
        ticket
    }

    fn merge(&mut self, ticket: PageTicket, page: PageResult) {
        let received = page.data.len();
        self.state.reported_total = page.total;
        self.state.error_message.clear();
        self.state.has_more = received >= PAGE_SIZE_THRESHOLD;

        match ticket.mode {
            LoadMode::Fresh => {
                self.state.attractions = page.data;
                self.state.status = if received == 0 {
                    Status::Empty
                } else {
                    Status::Success
                };
            }
            LoadMode::More => {
                self.state.attractions.extend(page.data);
                self.state.status = Status::Success;
            }
        }

        tracing::info!(
            page = ticket.page,
            received,
            loaded = self.state.attractions.len(),
            has_more = self.state.has_more,
            status = %self.state.status,
            "page applied"
        );
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}
