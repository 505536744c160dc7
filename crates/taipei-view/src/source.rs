use std::future::Future;

use taipei_client::{AttractionClient, FetchError};
use taipei_core::PageResult;

/// Where the coordinator gets pages from.
pub trait PageSource {
    fn fetch_page(
        &self,
        language: &str,
        page: u32,
    ) -> impl Future<Output = Result<PageResult, FetchError>> + Send;
}

impl PageSource for AttractionClient {
    fn fetch_page(
        &self,
        language: &str,
        page: u32,
    ) -> impl Future<Output = Result<PageResult, FetchError>> + Send {
        AttractionClient::fetch_page(self, language, page)
    }
}
