//! Single-writer store around the reducer.

use std::sync::Arc;

use tracing::debug;

use crate::action::ShopAction;
use crate::reducer::ShopReducer;
use crate::state::ShopState;

/// Owns the current snapshot and applies actions one at a time.
///
/// Dispatch takes `&mut self`, so transitions are serialized by whoever owns
/// the store. Readers take [`snapshot`](Self::snapshot) clones and keep them
/// as long as they like; a snapshot never changes after it is handed out.
#[derive(Debug, Clone)]
pub struct ShopStore {
    reducer: ShopReducer,
    state: Arc<ShopState>,
}

impl ShopStore {
    /// Create a store starting from `state`.
    #[must_use]
    pub const fn new(reducer: ShopReducer, state: Arc<ShopState>) -> Self {
        Self { reducer, state }
    }

    #[must_use]
    pub const fn reducer(&self) -> ShopReducer {
        self.reducer
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ShopState> {
        Arc::clone(&self.state)
    }

    /// Apply `action` and return the resulting snapshot.
    pub fn dispatch(&mut self, action: ShopAction) -> Arc<ShopState> {
        let kind = action.kind();
        let next = self.reducer.reduce(&self.state, action);
        debug!(
            kind,
            network = %self.reducer.network(),
            changed = !Arc::ptr_eq(&self.state, &next),
            "Dispatched shop action"
        );
        self.state = next;
        self.snapshot()
    }

    /// Drop everything: catalog, gift cards, and contact details.
    ///
    /// Used on logout, when the whole snapshot is destroyed together.
    pub fn reset(&mut self) -> Arc<ShopState> {
        debug!("Reset shop state");
        self.state = ShopState::initial();
        self.snapshot()
    }
}
