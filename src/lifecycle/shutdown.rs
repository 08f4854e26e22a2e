//! Shutdown coordination.

use tokio::sync::broadcast;

/// One-shot stop signal fanned out to long-running tasks.
///
/// The HTTP server and each gate's refresh loop hold a receiver. Dropping
/// the `Shutdown` closes the channel, which receivers also treat as a stop.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        // A single slot: the signal carries no data, only the wake-up matters.
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receivers created after [`trigger`](Self::trigger) do not see it.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Wake every current subscriber.
    ///
    /// Triggering again before a subscriber has received overwrites the single
    /// slot, so that subscriber's next `recv()` yields `Err(Lagged(n))` rather
    /// than `Ok(())`. Callers waiting for shutdown must treat any result as the
    /// signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::RecvError;

    #[tokio::test]
    async fn test_trigger_reaches_every_subscriber() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let mut refresh = shutdown.subscribe();

        shutdown.trigger();

        assert!(server.recv().await.is_ok());
        assert!(refresh.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_repeated_trigger_still_wakes_subscriber() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        shutdown.trigger();
        shutdown.trigger();

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(1))));
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let mut rx = shutdown.subscribe();
        assert!(matches!(rx.try_recv(), Err(broadcast::error::TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_drop_closes_subscribers() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        drop(shutdown);
        assert!(matches!(rx.recv().await, Err(RecvError::Closed)));
    }
}
