use serde::{Deserialize, Serialize};

/// Failure payload sent by the KPI backend.
///
/// Rejected requests carry `{"detail": "..."}` with a 4xx status; breakdown
/// endpoints answer `{"error": "..."}` with 200 when nothing was uploaded yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Human-readable text, `detail` first
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.error.as_deref())
    }

    /// Parse a body as an error payload; `None` unless it names a message
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|b| b.message().is_some())
    }
}
