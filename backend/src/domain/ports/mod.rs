//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod item_cache;
mod item_repository;
mod password_hasher;
mod token_issuer;
mod user_repository;

pub use cache_key::{CacheKey, CacheKeyValidationError};
pub use item_cache::{CacheError, InMemoryItemCache, ItemCache};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{FixtureItemRepository, ItemPersistenceError, ItemRepository};
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
