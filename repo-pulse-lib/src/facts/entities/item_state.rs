use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle state shared by issues and pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemState {
    Open,
    Closed,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_states() {
        assert_eq!("open".parse::<ItemState>().unwrap(), ItemState::Open);
        assert_eq!("closed".parse::<ItemState>().unwrap(), ItemState::Closed);
    }

    #[test]
    fn test_parse_unknown_state_fails() {
        let _ = "merged".parse::<ItemState>().unwrap_err();
    }
}
