//! PostgreSQL persistence adapters built on Diesel.

mod diesel_item_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_item_repository::DieselItemRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolError};
