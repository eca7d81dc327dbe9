//! Push transport capability injected into the fanout.

use crate::task::domain::UserId;
use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure reported by a push transport.
///
/// The fanout logs these and moves on; retry policy, if any, belongs to the
/// transport itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("push transport failure: {0}")]
pub struct PushError(String);

impl PushError {
    /// Creates a push error with a transport-supplied reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Capability to push a payload to a connected client.
///
/// Any transport satisfies this: WebSocket, server-sent events, a message
/// queue. The payload is the serialised notification row; the transport
/// treats it as opaque.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Pushes a payload to one recipient.
    async fn push(&self, recipient: UserId, payload: &serde_json::Value) -> Result<(), PushError>;
}
