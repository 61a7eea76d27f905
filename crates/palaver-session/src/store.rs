//! The session store: one watch channel holding the current snapshot.
//!
//! `dispatch` is the only way state changes. The watch sender's write lock
//! makes each read-reduce-replace step atomic, and subscribers always observe
//! a complete snapshot, never a half-applied one.

use crate::state::{reduce, Action, SessionState};
use std::sync::Arc;
use tokio::sync::watch;

pub struct SessionStore {
    tx: watch::Sender<Arc<SessionState>>,
}

impl SessionStore {
    pub fn new(initial: SessionState) -> Self {
        let (tx, _) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// The snapshot current right now.
    pub fn snapshot(&self) -> Arc<SessionState> {
        self.tx.borrow().clone()
    }

    /// Applies one action through the reducer and returns the resulting
    /// snapshot.
    pub fn dispatch(&self, action: Action) -> Arc<SessionState> {
        self.tx
            .send_modify(|state| *state = Arc::new(reduce(state, action)));
        self.tx.borrow().clone()
    }

    /// Subscribes to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionState>> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConnectionState;

    #[tokio::test]
    async fn dispatch_produces_a_fresh_snapshot() {
        let store = SessionStore::default();
        let before = store.snapshot();
        let after = store.dispatch(Action::SetConnection(ConnectionState::Connecting));

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.connection, ConnectionState::Disconnected);
        assert_eq!(after.connection, ConnectionState::Connecting);
    }

    #[tokio::test]
    async fn subscribers_observe_dispatched_snapshots() {
        let store = SessionStore::default();
        let mut rx = store.subscribe();

        store.dispatch(Action::SetInstructions("hello".to_string()));
        rx.changed().await.expect("store dropped");
        assert_eq!(rx.borrow().instructions, "hello");
    }
}
