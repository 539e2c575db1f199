//! Shared response payloads.

use serde::Serialize;

/// `{ "success": true }` acknowledgement for mutations that return no entity.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
