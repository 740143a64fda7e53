//! Database entities.

#![allow(missing_docs)]

pub mod author;
pub mod startup;
pub mod vote;

pub use author::Entity as Author;
pub use startup::Entity as Startup;
pub use vote::Entity as Vote;
