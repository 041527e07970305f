//! HS256 JWT implementation of the token issuer port.
//!
//! Claims carry the subject id, username, role, and a `token_use`
//! discriminator separating access from refresh tokens: a refresh token never
//! authorizes a request, and an access token never mints new tokens.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::token::{AccessToken, Identity, TokenPair};
use crate::domain::user::{Role, User, UserId, Username};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TokenUse {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    username: String,
    role: String,
    token_use: TokenUse,
    iat: i64,
    exp: i64,
}

/// HS256 adapter for the [`TokenIssuer`] port.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtTokenIssuer {
    /// Create an issuer from a shared secret and the two token lifetimes.
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    fn claims(
        sub: Uuid,
        username: &str,
        role: &str,
        token_use: TokenUse,
        ttl: Duration,
    ) -> Result<Claims, TokenError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl.as_secs())
            .map_err(|_| TokenError::signing("token lifetime out of range"))?;
        Ok(Claims {
            sub,
            username: username.to_owned(),
            role: role.to_owned(),
            token_use,
            iat: now,
            exp: now + ttl,
        })
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens are minted and verified by the same process; no clock-skew
        // allowance is needed.
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn mint_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        let sub = *user.id().as_uuid();
        let username = user.username().as_ref();
        let role = user.role().as_str();

        let access = self.encode_claims(&Self::claims(
            sub,
            username,
            role,
            TokenUse::Access,
            self.access_ttl,
        )?)?;
        let refresh = self.encode_claims(&Self::claims(
            sub,
            username,
            role,
            TokenUse::Refresh,
            self.refresh_ttl,
        )?)?;
        Ok(TokenPair { access, refresh })
    }

    fn refresh_access(&self, refresh_token: &str) -> Result<AccessToken, TokenError> {
        let claims = self.decode_claims(refresh_token)?;
        if claims.token_use != TokenUse::Refresh {
            return Err(TokenError::wrong_token_use());
        }
        let access = self.encode_claims(&Self::claims(
            claims.sub,
            &claims.username,
            &claims.role,
            TokenUse::Access,
            self.access_ttl,
        )?)?;
        Ok(AccessToken::new(access))
    }

    fn verify_access(&self, access_token: &str) -> Result<Identity, TokenError> {
        let claims = self.decode_claims(access_token)?;
        if claims.token_use != TokenUse::Access {
            return Err(TokenError::wrong_token_use());
        }
        let username = Username::new(&claims.username)
            .map_err(|err| TokenError::invalid(format!("bad username claim: {err}")))?;
        let role = Role::parse(&claims.role)
            .map_err(|err| TokenError::invalid(format!("bad role claim: {err}")))?;
        Ok(Identity {
            user_id: UserId::from_uuid(claims.sub),
            username,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for minting, refresh, and verification.
    use super::*;
    use crate::domain::user::{
        EmailAddress, NewUser, PasswordHashString, PersonName,
    };

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(
            b"token-test-secret",
            Duration::from_secs(900),
            Duration::from_secs(7 * 24 * 3600),
        )
    }

    fn user(role: Role) -> User {
        User::new(
            UserId::random(),
            NewUser {
                username: Username::new("ada").expect("valid username"),
                email: EmailAddress::new("ada@example.com").expect("valid email"),
                role,
                first_name: PersonName::first("Ada").expect("valid first name"),
                last_name: PersonName::last("Lovelace").expect("valid last name"),
                password_hash: PasswordHashString::new("$argon2id$stub"),
            },
        )
    }

    #[test]
    fn minted_access_token_verifies_to_the_user_identity() {
        let issuer = issuer();
        let user = user(Role::Admin);

        let pair = issuer.mint_pair(&user).expect("mint succeeds");
        let identity = issuer.verify_access(&pair.access).expect("verify succeeds");

        assert_eq!(identity.user_id, *user.id());
        assert_eq!(identity.username, *user.username());
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn refresh_token_does_not_authorize_requests() {
        let issuer = issuer();
        let pair = issuer.mint_pair(&user(Role::User)).expect("mint succeeds");

        let err = issuer
            .verify_access(&pair.refresh)
            .expect_err("refresh token must not verify as access");
        assert_eq!(err, TokenError::WrongTokenUse);
    }

    #[test]
    fn access_token_cannot_mint_new_access_tokens() {
        let issuer = issuer();
        let pair = issuer.mint_pair(&user(Role::User)).expect("mint succeeds");

        let err = issuer
            .refresh_access(&pair.access)
            .expect_err("access token must not refresh");
        assert_eq!(err, TokenError::WrongTokenUse);
    }

    #[test]
    fn refresh_mints_a_verifiable_access_token() {
        let issuer = issuer();
        let user = user(Role::User);
        let pair = issuer.mint_pair(&user).expect("mint succeeds");

        let access = issuer
            .refresh_access(&pair.refresh)
            .expect("refresh succeeds");
        let identity = issuer
            .verify_access(access.as_str())
            .expect("new access token verifies");
        assert_eq!(identity.user_id, *user.id());
    }

    #[test]
    fn tokens_from_another_secret_are_invalid() {
        let issuer = issuer();
        let other = JwtTokenIssuer::new(
            b"a-different-secret",
            Duration::from_secs(900),
            Duration::from_secs(3600),
        );
        let pair = other.mint_pair(&user(Role::User)).expect("mint succeeds");

        let err = issuer
            .verify_access(&pair.access)
            .expect_err("foreign signature must fail");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[test]
    fn garbage_tokens_are_invalid() {
        let err = issuer()
            .verify_access("not-a-jwt")
            .expect_err("garbage must fail");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let issuer = JwtTokenIssuer::new(
            b"token-test-secret",
            Duration::ZERO,
            Duration::from_secs(3600),
        );
        let pair = issuer.mint_pair(&user(Role::User)).expect("mint succeeds");

        // exp equals iat, so the token is expired as soon as the clock ticks.
        std::thread::sleep(Duration::from_millis(1100));
        let err = issuer
            .verify_access(&pair.access)
            .expect_err("expired token must fail");
        assert_eq!(err, TokenError::Expired);
    }
}
