//! Plain confirmation payload shared by mutation endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{"message": "..."}` body returned when there is nothing else to echo.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    #[schema(example = "Comment deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
