use serde::{Deserialize, Serialize};

/// Liveness payload returned by `GET /ping`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}
