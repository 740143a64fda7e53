//! Common utilities and shared types for pitchboard.
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: [`AppError`] for the service layer and the flat
//!   [`VoteError`] taxonomy returned by vote actions
//! - **ID Generation**: ULID-based identifiers via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use pitchboard_common::{AppResult, Config, IdGenerator};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id = IdGenerator::new().generate();
//!     println!("{} -> {}", config.server.url, id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult, VoteError};
pub use id::IdGenerator;
