// Request lifecycle management
//
// Requests live in a slotmap keyed by RequestToken. The manager owns every
// request for its lifetime, links parents to the children the delivery
// planner emits, and enforces the forward-only state machine.

use slotmap::SlotMap;

use crate::error::{Result, SupplyError};
use crate::requestable::Requestable;
use crate::types::{RequestToken, RequesterId};

// ============================================================================
// State machine
// ============================================================================

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RequestState {
    Created,
    Resolved,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestState::Completed | RequestState::Cancelled)
    }

    /// States advance strictly forward. Cancellation is reachable from any
    /// non-terminal state; terminal states absorb everything.
    pub fn can_transition_to(self, next: RequestState) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == RequestState::Cancelled {
            return true;
        }
        next.rank() == self.rank() + 1
    }

    fn rank(self) -> u8 {
        match self {
            RequestState::Created => 0,
            RequestState::Resolved => 1,
            RequestState::InProgress => 2,
            RequestState::Completed => 3,
            RequestState::Cancelled => 4,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Clone, Debug)]
pub struct Request {
    pub token: RequestToken,
    pub requester: RequesterId,
    pub requestable: Requestable,
    pub state: RequestState,
    pub parent: Option<RequestToken>,
    pub children: Vec<RequestToken>,
}

/// Owns request storage. The delivery planner and resolvers only see this
/// trait, so tests can substitute a failing manager when exercising
/// partial-failure paths.
pub trait RequestManager {
    /// Open a new top-level request.
    fn create_request(&mut self, requester: RequesterId, requestable: Requestable)
    -> RequestToken;

    /// Open a request parented to an existing one. The child inherits the
    /// parent's requester.
    fn create_child(
        &mut self,
        parent: RequestToken,
        requestable: Requestable,
    ) -> Result<RequestToken>;

    fn request(&self, token: RequestToken) -> Option<&Request>;

    fn requester_of(&self, token: RequestToken) -> Option<RequesterId>;

    fn update_state(&mut self, token: RequestToken, next: RequestState) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct StandardRequestManager {
    requests: SlotMap<RequestToken, Request>,
}

impl StandardRequestManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequestToken, &Request)> {
        self.requests.iter()
    }
}

impl RequestManager for StandardRequestManager {
    fn create_request(
        &mut self,
        requester: RequesterId,
        requestable: Requestable,
    ) -> RequestToken {
        let kind = requestable.kind();
        let token = self.requests.insert_with_key(|token| Request {
            token,
            requester,
            requestable,
            state: RequestState::Created,
            parent: None,
            children: Vec::new(),
        });
        tracing::debug!(target: "requests", ?token, ?kind, "request created");
        token
    }

    fn create_child(
        &mut self,
        parent: RequestToken,
        requestable: Requestable,
    ) -> Result<RequestToken> {
        let requester = self
            .requester_of(parent)
            .ok_or(SupplyError::UnknownRequest)?;
        let kind = requestable.kind();
        let token = self.requests.insert_with_key(|token| Request {
            token,
            requester,
            requestable,
            state: RequestState::Created,
            parent: Some(parent),
            children: Vec::new(),
        });
        // Parent existence was just checked above.
        if let Some(parent_req) = self.requests.get_mut(parent) {
            parent_req.children.push(token);
        }
        tracing::debug!(target: "requests", ?token, ?parent, ?kind, "child request created");
        Ok(token)
    }

    fn request(&self, token: RequestToken) -> Option<&Request> {
        self.requests.get(token)
    }

    fn requester_of(&self, token: RequestToken) -> Option<RequesterId> {
        self.requests.get(token).map(|r| r.requester)
    }

    fn update_state(&mut self, token: RequestToken, next: RequestState) -> Result<()> {
        let request = self
            .requests
            .get_mut(token)
            .ok_or(SupplyError::UnknownRequest)?;
        if !request.state.can_transition_to(next) {
            return Err(SupplyError::InvalidTransition {
                from: format!("{:?}", request.state),
                to: format!("{next:?}"),
            });
        }
        tracing::debug!(target: "requests", ?token, from = ?request.state, to = ?next, "state change");
        request.state = next;
        Ok(())
    }
}
