// Staging requests
//
// A staging request is a quantity of one item queued for broadcast to the
// supply network. It moves strictly forward through its lifecycle; the only
// branch is cancellation, available until the work is done.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SupplyError};
use crate::types::{ItemId, RequestToken};

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum StagingState {
    Queued,
    Broadcasted,
    Completed,
    Cancelled,
}

impl StagingState {
    pub fn is_terminal(self) -> bool {
        matches!(self, StagingState::Completed | StagingState::Cancelled)
    }

    pub fn can_transition_to(self, next: StagingState) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (StagingState::Queued, StagingState::Broadcasted)
                | (StagingState::Broadcasted, StagingState::Completed)
        ) || next == StagingState::Cancelled
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StagingRequest {
    item: ItemId,
    quantity: u32,
    requested_at_tick: u64,
    state: StagingState,
    broadcasted: bool,
    /// Token of the network request this staging entry belongs to, once one
    /// has been opened.
    parent: Option<RequestToken>,
    /// When several staging entries broadcast as one bundle, the token of
    /// the entry leading the bundle.
    bundle_leader: Option<RequestToken>,
}

impl StagingRequest {
    pub fn queued(item: ItemId, quantity: u32, requested_at_tick: u64) -> Self {
        Self {
            item,
            quantity,
            requested_at_tick,
            state: StagingState::Queued,
            broadcasted: false,
            parent: None,
            bundle_leader: None,
        }
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn requested_at_tick(&self) -> u64 {
        self.requested_at_tick
    }

    pub fn state(&self) -> StagingState {
        self.state
    }

    /// Sticky flag: once a request has been on the wire it stays marked,
    /// even through cancellation.
    pub fn was_broadcasted(&self) -> bool {
        self.broadcasted
    }

    pub fn parent(&self) -> Option<RequestToken> {
        self.parent
    }

    pub fn set_parent(&mut self, token: RequestToken) {
        self.parent = Some(token);
    }

    pub fn bundle_leader(&self) -> Option<RequestToken> {
        self.bundle_leader
    }

    pub fn set_bundle_leader(&mut self, token: RequestToken) {
        self.bundle_leader = Some(token);
    }

    pub fn transition(&mut self, next: StagingState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(SupplyError::InvalidTransition {
                from: format!("{:?}", self.state),
                to: format!("{next:?}"),
            });
        }
        tracing::debug!(
            target: "staging",
            item = %self.item,
            from = ?self.state,
            to = ?next,
            "staging state change"
        );
        if next == StagingState::Broadcasted {
            self.broadcasted = true;
        }
        self.state = next;
        Ok(())
    }
}
