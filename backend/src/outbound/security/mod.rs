//! Credential adapters: password hashing and JWT issuance.

mod password;
mod tokens;

pub use password::Argon2PasswordHasher;
pub use tokens::JwtTokenIssuer;
