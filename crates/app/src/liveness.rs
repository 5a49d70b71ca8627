//! Shared link liveness flag backed by a tokio watch channel.

use std::sync::Arc;

use tokio::sync::watch;

/// Signals whether the serial link is still usable.
///
/// Starts alive. Going down is one-way: once [`mark_down`](Self::mark_down)
/// has been called every clone observes it, and tasks blocked in
/// [`wait_down`](Self::wait_down) wake up.
#[derive(Debug, Clone)]
pub struct Liveness {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self {
            sender: Arc::new(watch::Sender::new(true)),
        }
    }
}

impl Liveness {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        *self.sender.borrow()
    }

    /// Mark the link as down. Returns `true` for the call that flipped the flag.
    pub fn mark_down(&self) -> bool {
        self.sender
            .send_if_modified(|alive| std::mem::replace(alive, false))
    }

    /// Resolve once the link is down (immediately if it already is).
    pub async fn wait_down(&self) {
        let mut rx = self.sender.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|alive| !*alive).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn should_start_alive() {
        assert!(Liveness::new().is_alive());
    }

    #[test]
    fn should_report_first_mark_down_only() {
        let liveness = Liveness::new();
        assert!(liveness.mark_down());
        assert!(!liveness.mark_down());
        assert!(!liveness.is_alive());
    }

    #[test]
    fn should_share_state_between_clones() {
        let liveness = Liveness::new();
        let other = liveness.clone();
        other.mark_down();
        assert!(!liveness.is_alive());
    }

    #[tokio::test]
    async fn should_resolve_wait_down_when_already_down() {
        let liveness = Liveness::new();
        liveness.mark_down();
        tokio::time::timeout(Duration::from_secs(1), liveness.wait_down())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn should_wake_waiter_when_marked_down() {
        let liveness = Liveness::new();
        let waiter = {
            let liveness = liveness.clone();
            tokio::spawn(async move { liveness.wait_down().await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        liveness.mark_down();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
