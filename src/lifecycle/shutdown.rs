//! Shutdown coordination.

use std::future::Future;

use tokio::sync::broadcast;

/// Broadcasts a single shutdown event to every long-running task.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown event.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the shutdown event. Safe to call more than once.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// A future that resolves once shutdown is triggered.
    ///
    /// Subscribes immediately, so a trigger that happens before the future is
    /// first polled is not missed.
    pub fn signaled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
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
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_before_poll_is_seen() {
        let shutdown = Shutdown::new();
        let signaled = shutdown.signaled();
        assert_eq!(shutdown.receiver_count(), 1);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), signaled)
            .await
            .expect("shutdown future should resolve");
    }
}
