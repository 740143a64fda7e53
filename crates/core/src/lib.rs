//! Core business logic for pitchboard.
//!
//! - [`services`]: server-side operations (vote actions, pitch creation,
//!   session resolution)
//! - [`voting`]: the client-side voting state machine (section state,
//!   buttons, display) and the [`voting::VoteActions`] seam it drives

pub mod services;
pub mod voting;

pub use services::*;
