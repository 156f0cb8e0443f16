//! Response envelope shared by every endpoint.
//!
//! ```json
//! { "state": { "status": "Success" }, "data": { "token": "..." } }
//! { "state": { "status": "Error", "error": "failed to authentificate user" } }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub state: State,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            state: State {
                status: Status::Success,
                error: None,
            },
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn success() -> Self {
        Self {
            state: State {
                status: Status::Success,
                error: None,
            },
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            state: State {
                status: Status::Error,
                error: Some(message.into()),
            },
            data: None,
        }
    }
}
