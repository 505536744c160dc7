use taipei_core::Attraction;

/// A page with at least this many records is taken to mean more pages
/// exist. The upstream does not report a page count, so this is a
/// heuristic: a last page holding exactly 30 records costs one extra
/// request that comes back empty.
pub const PAGE_SIZE_THRESHOLD: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Empty,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Loading => write!(f, "loading"),
            Status::Success => write!(f, "success"),
            Status::Empty => write!(f, "empty"),
            Status::Error => write!(f, "error"),
        }
    }
}

/// Everything the directory knows for the current session.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Accumulated records, in fetch order. Append-only across load-more,
    /// replaced on a fresh load.
    pub attractions: Vec<Attraction>,
    pub status: Status,
    /// Page cursor, starting at 1.
    pub page: u32,
    pub has_more: bool,
    /// Search text; blank means no filter.
    pub keyword: String,
    /// Meaningful only while `status == Status::Error`.
    pub error_message: String,
    /// `total` from the most recent page. Informational only.
    pub reported_total: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            attractions: Vec::new(),
            status: Status::Idle,
            page: 1,
            has_more: true,
            keyword: String::new(),
            error_message: String::new(),
            reported_total: 0,
        }
    }
}
