//! Domain entities, services, and ports.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, the transport-agnostic error type, and the two
//! use-case services. Types are immutable; invariants and serialisation
//! contracts live in each type's Rustdoc.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod inventory_service;
pub mod item;
pub mod ports;
pub mod token;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode};
pub use self::inventory_service::{InventoryService, DEFAULT_CACHE_TTL};
pub use self::item::{Item, ItemDraft, ItemId, ItemName, ItemValidationError, Price, Quantity};
pub use self::token::{AccessToken, Identity, TokenPair};
pub use self::user::{
    EmailAddress, NewUser, PasswordHashString, PersonName, Role, User, UserId, UserProfile,
    Username, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use stockroom::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
