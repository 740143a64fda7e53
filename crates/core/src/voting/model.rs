//! Vote counts, the caller's vote projection, and optimistic deltas.

use pitchboard_db::entities::vote::{self, VoteType};
use serde::{Deserialize, Serialize};

/// Aggregate thumbs-up / thumbs-down counts for a startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCounts {
    pub thumbs_up: u64,
    pub thumbs_down: u64,
}

impl VoteCounts {
    #[must_use]
    pub const fn new(thumbs_up: u64, thumbs_down: u64) -> Self {
        Self {
            thumbs_up,
            thumbs_down,
        }
    }

    /// Apply a signed delta, clamping each count at zero.
    #[must_use]
    pub const fn apply(self, delta: VoteDelta) -> Self {
        Self {
            thumbs_up: self.thumbs_up.saturating_add_signed(delta.thumbs_up),
            thumbs_down: self.thumbs_down.saturating_add_signed(delta.thumbs_down),
        }
    }
}

/// The current user's vote on a startup.
///
/// `id` is `None` for an optimistic projection whose record id the client
/// has not seen yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub vote_type: Option<VoteType>,
}

impl From<vote::Model> for UserVote {
    fn from(v: vote::Model) -> Self {
        Self {
            id: Some(v.id),
            vote_type: Some(v.vote_type),
        }
    }
}

/// Signed change to apply to displayed counts after a successful click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteDelta {
    pub thumbs_up: i64,
    pub thumbs_down: i64,
}

impl VoteDelta {
    #[must_use]
    pub const fn new(thumbs_up: i64, thumbs_down: i64) -> Self {
        Self {
            thumbs_up,
            thumbs_down,
        }
    }

    /// Delta for clicking `clicked` while the user's vote is `current`.
    ///
    /// Clicking the active button retracts the vote; clicking the other
    /// button moves it; clicking with no vote casts one.
    #[must_use]
    pub const fn for_click(current: Option<VoteType>, clicked: VoteType) -> Self {
        match (current, clicked) {
            (None, VoteType::Up) => Self::new(1, 0),
            (None, VoteType::Down) => Self::new(0, 1),
            (Some(VoteType::Down), VoteType::Up) => Self::new(1, -1),
            (Some(VoteType::Up), VoteType::Down) => Self::new(-1, 1),
            (Some(VoteType::Up), VoteType::Up) => Self::new(-1, 0),
            (Some(VoteType::Down), VoteType::Down) => Self::new(0, -1),
        }
    }

    /// The vote type this delta leaves the user with.
    ///
    /// `Some(None)` means the vote was retracted; `None` means the delta
    /// carries no vote change.
    #[must_use]
    pub const fn resulting_vote(self) -> Option<Option<VoteType>> {
        if self.thumbs_up > 0 {
            Some(Some(VoteType::Up))
        } else if self.thumbs_down > 0 {
            Some(Some(VoteType::Down))
        } else if self.thumbs_up < 0 || self.thumbs_down < 0 {
            Some(None)
        } else {
            None
        }
    }
}
