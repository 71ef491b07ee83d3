//! Parameters of the header relay.

use serde::{Deserialize, Serialize};

use crate::default::MEDIAN_TIME_WINDOW;

/// The parameters governing header acceptance in the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayParams {
    /// Number of ancestor headers whose median timestamp a new header must exceed.
    pub median_time_window: usize,
}

impl Default for RelayParams {
    fn default() -> Self {
        Self {
            median_time_window: MEDIAN_TIME_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_toml() {
        let params: RelayParams = toml::from_str("median_time_window = 5").unwrap();
        assert_eq!(params.median_time_window, 5);
    }
}
