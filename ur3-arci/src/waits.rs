use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::future::{self, BoxFuture, FutureExt};

use crate::error::Error;

/// A future that resolves once a motion has been executed.
///
/// Awaiting it is the "wait until executed" step of a move. Dropping it does
/// not stop a motion that has already been issued.
#[must_use = "You must explicitly choose whether to wait for the motion or detach it"]
pub struct WaitFuture {
    future: BoxFuture<'static, Result<(), Error>>,
}

impl WaitFuture {
    /// Creates a new `WaitFuture` from the given future.
    pub fn new(future: impl Future<Output = Result<(), Error>> + Send + 'static) -> Self {
        Self {
            future: future.boxed(),
        }
    }

    /// Creates a `WaitFuture` that is already complete.
    pub fn ready() -> Self {
        Self::new(future::ready(Ok(())))
    }
}

impl Future for WaitFuture {
    type Output = Result<(), Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

impl fmt::Debug for WaitFuture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitFuture").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready() {
        assert!(WaitFuture::ready().await.is_ok());
    }

    #[tokio::test]
    async fn test_error_is_forwarded() {
        let wait = WaitFuture::new(async {
            Err(Error::Canceled {
                message: "stopped".to_owned(),
            })
        });
        let err = wait.await.unwrap_err();
        assert!(matches!(err, Error::Canceled { .. }));
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", WaitFuture::ready()), "WaitFuture { .. }");
    }
}
