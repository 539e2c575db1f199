//! Pure domain logic for the guild recipe tracker.
//!
//! Nothing in this crate touches the database, the network, or the clock;
//! the `db` and `api` crates build on these types and functions.

pub mod catalog;
pub mod error;
pub mod recipe_match;
pub mod types;
