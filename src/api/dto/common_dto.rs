//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for time-series history endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct HistoryParams {
    /// Number of most recent readings to return (max 100). Defaults to 10.
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    10
}

impl HistoryParams {
    /// Clamps `count` to the allowed maximum of 100.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            count: self.count.min(100),
        }
    }
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            count: default_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_clamped_to_maximum() {
        let params = HistoryParams { count: 5000 }.clamped();
        assert_eq!(params.count, 100);
    }

    #[test]
    fn default_count_is_preserved() {
        let params = HistoryParams::default().clamped();
        assert_eq!(params.count, 10);
    }
}
