//! Recording push transport for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::notification::ports::{PushError, PushTransport};
use crate::task::domain::UserId;

#[derive(Debug, Default)]
struct RecordingState {
    pushed: Vec<(UserId, serde_json::Value)>,
    failing: HashSet<UserId>,
    fail_all: bool,
}

/// Push transport that records deliveries instead of sending them.
///
/// Individual recipients (or the whole transport) can be made to fail so
/// tests can observe the persist-before-push contract.
#[derive(Debug, Clone, Default)]
pub struct RecordingPushTransport {
    state: Arc<RwLock<RecordingState>>,
}

impl RecordingPushTransport {
    /// Creates a transport that accepts every push.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes pushes to one recipient fail.
    pub fn fail_for(&self, recipient: UserId) {
        if let Ok(mut state) = self.state.write() {
            state.failing.insert(recipient);
        }
    }

    /// Makes every push fail.
    pub fn fail_all(&self) {
        if let Ok(mut state) = self.state.write() {
            state.fail_all = true;
        }
    }

    /// Returns the recorded deliveries in push order.
    #[must_use]
    pub fn pushed(&self) -> Vec<(UserId, serde_json::Value)> {
        self.state
            .read()
            .map(|state| state.pushed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PushTransport for RecordingPushTransport {
    async fn push(&self, recipient: UserId, payload: &serde_json::Value) -> Result<(), PushError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| PushError::new(err.to_string()))?;
        if state.fail_all || state.failing.contains(&recipient) {
            return Err(PushError::new("transport unavailable"));
        }
        state.pushed.push((recipient, payload.clone()));
        Ok(())
    }
}
