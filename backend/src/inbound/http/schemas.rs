//! Response envelopes shared across handler modules.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Simple acknowledgement payload for mutations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "announcement updated successfully")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a human-readable acknowledgement.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
