pub mod movie;
pub mod user;

pub use movie::*;
pub use user::*;

use serde::Serialize;

/// Plain confirmation body, e.g. `{"message": "User deleted successfully"}`
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
