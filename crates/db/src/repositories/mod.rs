//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Methods that must share a transaction take
//! `&mut PgConnection` instead (pass `&mut *tx`).

pub mod character_repo;
pub mod known_recipe_repo;
pub mod oauth_state_repo;
pub mod profession_repo;
pub mod recipe_repo;
pub mod session_repo;
pub mod user_repo;

pub use character_repo::CharacterRepo;
pub use known_recipe_repo::KnownRecipeRepo;
pub use oauth_state_repo::OAuthStateRepo;
pub use profession_repo::ProfessionRepo;
pub use recipe_repo::RecipeRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
