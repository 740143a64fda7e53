//! Database repositories.

mod author;
mod startup;
mod vote;

pub use author::AuthorRepository;
pub use startup::StartupRepository;
pub use vote::VoteRepository;
