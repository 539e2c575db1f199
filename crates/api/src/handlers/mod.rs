pub mod auth;
pub mod characters;
pub mod professions;
pub mod recipes;
