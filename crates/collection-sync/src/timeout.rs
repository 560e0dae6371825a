//! Bounded remote calls
//!
//! Native builds use the tokio timer of the runtime polling the call;
//! wasm builds race the call against a browser timer.

use std::future::Future;
use std::time::Duration;

use crate::error::RequestError;

#[cfg(not(target_arch = "wasm32"))]
pub(crate) async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, RequestError>
where
    F: Future<Output = Result<T, RequestError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(RequestError::Timeout(limit)),
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, RequestError>
where
    F: Future<Output = Result<T, RequestError>>,
{
    use futures::future::{select, Either};

    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    let timer = gloo_timers::future::TimeoutFuture::new(millis);
    futures::pin_mut!(call);
    match select(call, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(RequestError::Timeout(limit)),
    }
}
