//! Shutdown signal helpers
//!
//! The CLI owns a `watch::Sender<bool>` flipped to `true` on SIGINT/SIGTERM.
//! Long waits in the pipeline race against [`wait_for_shutdown`].

use std::future::Future;
use tokio::sync::watch;

/// Whether shutdown has already been requested
pub fn is_shutdown_requested(signal: &watch::Receiver<bool>) -> bool {
    *signal.borrow()
}

/// Resolve once the signal reads `true`
///
/// Never resolves if the sender is dropped without requesting shutdown.
pub async fn wait_for_shutdown(mut signal: watch::Receiver<bool>) {
    loop {
        if *signal.borrow_and_update() {
            return;
        }
        if signal.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Resolve once Ctrl+C or the optional terminate signal fires
///
/// A Ctrl+C listener that fails to register leaves only `terminate`; with
/// neither available this never resolves.
pub async fn wait_for_signal<C, T>(ctrl_c: C, terminate: Option<T>)
where
    C: Future<Output = std::io::Result<()>>,
    T: Future<Output = ()>,
{
    let terminate = async {
        match terminate {
            Some(signal) => signal.await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(terminate);

    tokio::select! {
        result = ctrl_c => match result {
            Ok(()) => {
                tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                return;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        },
        _ = &mut terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
            return;
        }
    }

    terminate.await;
    tracing::info!("Received SIGTERM, initiating graceful shutdown...");
}

/// A receiver that never signals shutdown
///
/// For callers (and tests) that run the pipeline without signal handling.
pub fn never() -> watch::Receiver<bool> {
    // The sender is dropped immediately; a closed channel still reads `false`.
    watch::channel(false).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_resolves_after_signal() {
        let (tx, rx) = watch::channel(false);
        let waiter = tokio::spawn(wait_for_shutdown(rx));

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_pends_when_sender_dropped() {
        let (tx, rx) = watch::channel(false);
        drop(tx);

        let result = tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(rx)).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_is_shutdown_requested() {
        let (tx, rx) = watch::channel(false);
        assert!(!is_shutdown_requested(&rx));
        tx.send(true).unwrap();
        assert!(is_shutdown_requested(&rx));
        assert!(!is_shutdown_requested(&never()));
    }

    #[tokio::test]
    async fn test_ctrl_c_alone_is_enough() {
        let no_terminate: Option<std::future::Ready<()>> = None;
        tokio::time::timeout(
            Duration::from_secs(1),
            wait_for_signal(async { Ok::<(), std::io::Error>(()) }, no_terminate),
        )
        .await
        .expect("Ctrl+C should end the wait");
    }

    #[tokio::test]
    async fn test_terminate_ends_wait() {
        tokio::time::timeout(
            Duration::from_secs(1),
            wait_for_signal(std::future::pending::<std::io::Result<()>>(), Some(async {})),
        )
        .await
        .expect("terminate should end the wait");
    }

    #[tokio::test]
    async fn test_failed_ctrl_c_still_waits_for_terminate() {
        let ctrl_c = async { Err::<(), _>(std::io::Error::new(std::io::ErrorKind::Other, "no handler")) };
        let terminate = tokio::time::sleep(Duration::from_millis(20));

        tokio::time::timeout(Duration::from_secs(1), wait_for_signal(ctrl_c, Some(terminate)))
            .await
            .expect("terminate should still end the wait");
    }

    #[tokio::test]
    async fn test_failed_ctrl_c_without_terminate_never_resolves() {
        let ctrl_c = async { Err::<(), _>(std::io::Error::new(std::io::ErrorKind::Other, "no handler")) };
        let no_terminate: Option<std::future::Ready<()>> = None;

        let result =
            tokio::time::timeout(Duration::from_millis(50), wait_for_signal(ctrl_c, no_terminate)).await;
        assert!(result.is_err());
    }
}
