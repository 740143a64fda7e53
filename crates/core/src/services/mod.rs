//! Business logic services.

#![allow(missing_docs)]

pub mod session;
pub mod startup;
pub mod vote;

pub use session::{Session, SessionResolver, SessionService, TokenSessionResolver};
pub use startup::{
    CreatePitchInput, HttpImageProbe, ImageProbe, ImageProbeService, NoOpImageProbe,
    StartupPage, StartupService, slugify,
};
pub use vote::{
    GetUserVoteInput, RemoveVoteInput, SubmitVoteInput, SubmittedVote, VoteChange, VoteService,
};
