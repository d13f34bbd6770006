//! Store handle.

use std::sync::Arc;

use tokio::sync::watch;

use super::{Reducer, RequestToken, TokenSource};

/// Cloneable handle to one slice of state.
///
/// Dispatching runs the reducer under the channel lock, so concurrent
/// dispatches are serialized and every reader sees a consistent snapshot.
/// Views subscribe to re-render on change.
pub struct Store<R: Reducer> {
    state: Arc<watch::Sender<R::State>>,
    tokens: TokenSource,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R: Reducer> std::fmt::Debug for Store<R>
where
    R::State: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(initial: R::State) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
            tokens: TokenSource::new(),
        }
    }

    /// Apply an intent.
    ///
    /// Returns `true` if the state changed. Subscribers are only notified
    /// on change.
    pub fn dispatch(&self, intent: R::Intent) -> bool {
        self.state.send_if_modified(|state| R::reduce(state, intent))
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> R::State {
        self.state.borrow().clone()
    }

    /// Read part of the state without cloning all of it.
    pub fn select<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.state.borrow())
    }

    /// Receiver that observes every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.state.subscribe()
    }

    /// Replace the whole state, e.g. when rehydrating from storage.
    pub fn replace(&self, state: R::State) {
        self.state.send_replace(state);
    }

    /// Issue a token for a new request from this slice.
    #[must_use]
    pub fn next_token(&self) -> RequestToken {
        self.tokens.issue()
    }
}
