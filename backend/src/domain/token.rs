//! Token types minted and verified by the token issuer port.
//!
//! Tokens are opaque strings to the domain; structure and signing live in the
//! outbound adapter. The pair is minted at login and never persisted or
//! revoked server-side: a refresh token stays valid until its own expiry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::{Role, UserId, Username};

/// Access/refresh token pair returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    /// Short-lived bearer credential for authorizing requests.
    pub access: String,
    /// Longer-lived credential for minting new access tokens.
    pub refresh: String,
}

/// Freshly minted access token, as returned by the refresh operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the encoded token.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Verified identity claims carried by an access token.
///
/// This is what protected handlers receive after bearer verification; it
/// deliberately contains no secret material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: Username,
    pub role: Role,
}
