//! Client-side voting: optimistic state, button interaction and display.
//!
//! [`VotingSection`] owns the displayed counts and the viewer's vote.
//! [`VoteButtons`] routes clicks to a [`VoteActions`] implementation, either
//! in-process ([`SessionVoteActions`]) or over HTTP ([`HttpVoteActions`]).

#![allow(missing_docs)]

pub mod actions;
pub mod buttons;
pub mod display;
pub mod model;
pub mod remote;
pub mod section;

pub use actions::{SessionVoteActions, VoteActions};
pub use buttons::{ButtonView, ClickOutcome, VoteButtons};
pub use display::VoteDisplay;
pub use model::{UserVote, VoteCounts, VoteDelta};
pub use remote::HttpVoteActions;
pub use section::{Controls, SectionView, VotingProps, VotingSection};
