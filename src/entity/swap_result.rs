use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one successful swap execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapResult {
    pub signature: String,
    pub confirmed: bool,
    pub confirmed_at: DateTime<Utc>,
}

impl SwapResult {
    pub fn confirmed(signature: String) -> Self {
        Self {
            signature,
            confirmed: true,
            confirmed_at: Utc::now(),
        }
    }
}
