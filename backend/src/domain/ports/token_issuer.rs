//! Port for minting and verifying access/refresh tokens.
//!
//! Signing and claim layout belong to the adapter; the domain only sees
//! opaque strings and the verified [`Identity`]. Operations are synchronous:
//! token work is pure CPU, no I/O.

use crate::domain::token::{AccessToken, Identity, TokenPair};
use crate::domain::user::User;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by token adapters.
    pub enum TokenError {
        /// The token's signature and shape are fine but it has expired.
        Expired => "token expired",
        /// The token is malformed, tampered with, or signed by another key.
        Invalid { message: String } => "invalid token: {message}",
        /// A refresh token was presented where an access token is required,
        /// or vice versa.
        WrongTokenUse => "token presented for the wrong purpose",
        /// Signing failed while minting.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues and verifies bearer tokens carrying a user identity claim.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Mint an access/refresh pair for an authenticated user.
    fn mint_pair(&self, user: &User) -> Result<TokenPair, TokenError>;

    /// Verify a refresh token and mint a fresh access token from its claims.
    fn refresh_access(&self, refresh_token: &str) -> Result<AccessToken, TokenError>;

    /// Verify an access token and return the identity it carries.
    fn verify_access(&self, access_token: &str) -> Result<Identity, TokenError>;
}
