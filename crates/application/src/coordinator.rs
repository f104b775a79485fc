//! Single-flight refresh coordination.
//!
//! Many requests can fail with an auth error at once; only one of them
//! may perform the reissue network call. The first caller into a cycle
//! becomes the leader, everyone else parks as a waiter and is resolved
//! exactly once when the leader finishes.

use tokio::sync::{Mutex, oneshot};

/// Outcome of a refresh cycle: the new access token, or `None` when the
/// cycle failed.
pub type RefreshOutcome = Option<String>;

/// Ticket handed to a request entering the refresh protocol.
pub enum RefreshTicket {
    /// No refresh was in flight; the caller must perform the reissue and
    /// then call [`RefreshCoordinator::finish`], whatever the result.
    Leader,
    /// A refresh is already in flight; await the receiver for its outcome.
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

#[derive(Default)]
struct RefreshCycle {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// Serializes concurrent refresh attempts into a single network call.
///
/// The flag and the waiter queue are private per-instance state:
/// independent authorized clients share refresh state only when they
/// share a coordinator. The lock is held for state mutation only, never
/// across I/O.
#[derive(Default)]
pub struct RefreshCoordinator {
    cycle: Mutex<RefreshCycle>,
}

impl RefreshCoordinator {
    /// Creates a coordinator in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters the refresh protocol.
    ///
    /// Returns [`RefreshTicket::Leader`] when no refresh is in flight
    /// (the cycle is now marked as refreshing), or a
    /// [`RefreshTicket::Waiter`] registered on the current cycle.
    pub async fn begin(&self) -> RefreshTicket {
        let mut cycle = self.cycle.lock().await;
        if cycle.refreshing {
            let (tx, rx) = oneshot::channel();
            cycle.waiters.push(tx);
            tracing::debug!(waiters = cycle.waiters.len(), "refresh in flight, queued waiter");
            RefreshTicket::Waiter(rx)
        } else {
            cycle.refreshing = true;
            tracing::debug!("starting refresh cycle");
            RefreshTicket::Leader
        }
    }

    /// Ends the current cycle and resolves every queued waiter with
    /// `outcome`, including the failure case, so no waiter is ever left
    /// pending. The waiter list is drained and the idle state restored
    /// before any notification is delivered; a later cycle starts empty.
    pub async fn finish(&self, outcome: RefreshOutcome) {
        let waiters = {
            let mut cycle = self.cycle.lock().await;
            cycle.refreshing = false;
            std::mem::take(&mut cycle.waiters)
        };

        tracing::debug!(
            waiters = waiters.len(),
            success = outcome.is_some(),
            "refresh cycle finished"
        );

        for waiter in waiters {
            // A waiter whose task was dropped is simply gone.
            let _ = waiter.send(outcome.clone());
        }
    }

    /// Whether a refresh is currently in flight.
    pub async fn is_refreshing(&self) -> bool {
        self.cycle.lock().await.refreshing
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_caller_leads() {
        let coordinator = RefreshCoordinator::new();

        assert!(matches!(coordinator.begin().await, RefreshTicket::Leader));
        assert!(coordinator.is_refreshing().await);
    }

    #[tokio::test]
    async fn test_second_caller_waits() {
        let coordinator = RefreshCoordinator::new();
        let _leader = coordinator.begin().await;

        assert!(matches!(
            coordinator.begin().await,
            RefreshTicket::Waiter(_)
        ));
    }

    #[tokio::test]
    async fn test_finish_resolves_all_waiters() {
        let coordinator = RefreshCoordinator::new();
        let _leader = coordinator.begin().await;

        let mut receivers = Vec::new();
        for _ in 0..4 {
            match coordinator.begin().await {
                RefreshTicket::Waiter(rx) => receivers.push(rx),
                RefreshTicket::Leader => panic!("second leader while refreshing"),
            }
        }

        coordinator.finish(Some("fresh-token".to_string())).await;

        for rx in receivers {
            assert_eq!(rx.await.unwrap().unwrap(), "fresh-token");
        }
        assert!(!coordinator.is_refreshing().await);
    }

    #[tokio::test]
    async fn test_failed_cycle_rejects_waiters() {
        let coordinator = RefreshCoordinator::new();
        let _leader = coordinator.begin().await;

        let RefreshTicket::Waiter(rx) = coordinator.begin().await else {
            panic!("expected waiter");
        };

        coordinator.finish(None).await;

        // The waiter is resolved, not left pending.
        assert!(rx.await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_cycle_starts_empty() {
        let coordinator = RefreshCoordinator::new();
        let _leader = coordinator.begin().await;
        let RefreshTicket::Waiter(first_rx) = coordinator.begin().await else {
            panic!("expected waiter");
        };
        coordinator.finish(Some("one".to_string())).await;
        assert_eq!(first_rx.await.unwrap().unwrap(), "one");

        // A fresh cycle: new leader, and its waiters see only the new outcome.
        assert!(matches!(coordinator.begin().await, RefreshTicket::Leader));
        let RefreshTicket::Waiter(second_rx) = coordinator.begin().await else {
            panic!("expected waiter");
        };
        coordinator.finish(Some("two".to_string())).await;
        assert_eq!(second_rx.await.unwrap().unwrap(), "two");
    }
}
