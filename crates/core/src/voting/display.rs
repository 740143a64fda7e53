//! Read-only rendering of vote counts.

use serde::Serialize;
use std::fmt;

use crate::voting::VoteCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteDisplay {
    pub thumbs_up: u64,
    pub thumbs_down: u64,
}

impl VoteDisplay {
    #[must_use]
    pub const fn new(counts: VoteCounts) -> Self {
        Self {
            thumbs_up: counts.thumbs_up,
            thumbs_down: counts.thumbs_down,
        }
    }

    #[must_use]
    pub fn thumbs_up_label(&self) -> String {
        format!("{} thumbs up votes", self.thumbs_up)
    }

    #[must_use]
    pub fn thumbs_down_label(&self) -> String {
        format!("{} thumbs down votes", self.thumbs_down)
    }
}

impl From<VoteCounts> for VoteDisplay {
    fn from(counts: VoteCounts) -> Self {
        Self::new(counts)
    }
}

impl fmt::Display for VoteDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "👍 {}  👎 {}", self.thumbs_up, self.thumbs_down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let display = VoteDisplay::new(VoteCounts::new(4, 0));
        assert_eq!(display.thumbs_up_label(), "4 thumbs up votes");
        assert_eq!(display.thumbs_down_label(), "0 thumbs down votes");
        assert_eq!(display.to_string(), "👍 4  👎 0");
    }
}
