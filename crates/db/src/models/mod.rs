//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where the API creates rows

pub mod character;
pub mod known_recipe;
pub mod profession;
pub mod recipe;
pub mod session;
pub mod user;
