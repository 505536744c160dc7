//! Ordered route fallback.
//!
//! [`first_success`] runs one attempt per route, in order, and stops at the
//! first success. There is no back-off and no second attempt over the same
//! route: each call makes at most `routes.len()` requests.

use std::future::Future;

use crate::error::{AttemptError, RouteFailure};
use crate::route::Route;

/// Tries `attempt` over each route in turn.
///
/// Returns the first successful value, or every failure in route order once
/// the list is exhausted. An empty route list yields `Err(vec![])`.
pub(crate) async fn first_success<T, F, Fut>(
    routes: &[Route],
    mut attempt: F,
) -> Result<T, Vec<RouteFailure>>
where
    F: FnMut(Route) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut failures = Vec::with_capacity(routes.len());

    for (index, route) in routes.iter().enumerate() {
        let label = route.label();
        match attempt(route.clone()).await {
            Ok(value) => {
                if index > 0 {
                    tracing::info!(route = label, "request succeeded on fallback route");
                }
                return Ok(value);
            }
            Err(error) => {
                let remaining = routes.len() - index - 1;
                tracing::warn!(
                    route = label,
                    remaining,
                    error = %error,
                    "route failed"
                );
                failures.push(RouteFailure {
                    route: label,
                    error,
                });
            }
        }
    }

    Err(failures)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn routes() -> Vec<Route> {
        vec![
            Route::Direct,
            Route::Relay {
                prefix: "https://corsproxy.io/?".to_owned(),
            },
        ]
    }

    fn status_err(status: u16) -> AttemptError {
        AttemptError::UnexpectedStatus {
            status,
            url: "https://www.travel.taipei/open-api".to_owned(),
        }
    }

    #[tokio::test]
    async fn stops_after_first_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = first_success(&routes(), |route| {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<&'static str, AttemptError>(route.label())
            }
        })
        .await;
        assert_eq!(result.unwrap(), "direct");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falls_through_to_second_route() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = first_success(&routes(), |route| {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                match route {
                    Route::Direct => Err(status_err(502)),
                    Route::Relay { .. } => Ok(7),
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn collects_every_failure_in_order() {
        let result = first_success(&routes(), |route| async move {
            match route {
                Route::Direct => Err::<(), _>(status_err(500)),
                Route::Relay { .. } => Err(status_err(403)),
            }
        })
        .await;

        let failures = result.unwrap_err();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].route, "direct");
        assert_eq!(failures[1].route, "relay");
        assert!(matches!(
            failures[1].error,
            AttemptError::UnexpectedStatus { status: 403, .. }
        ));
    }

    #[tokio::test]
    async fn empty_route_list_fails_without_attempts() {
        let result = first_success(&[], |_route| async { Ok::<u8, AttemptError>(1) }).await;
        assert!(result.unwrap_err().is_empty());
    }
}
