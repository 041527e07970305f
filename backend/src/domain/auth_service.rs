//! Signup, login, and token-refresh use-cases.
//!
//! The service orchestrates the user repository, the password hasher, and
//! the token issuer. Login failures are deliberately uniform: an unknown
//! username and a wrong password produce the same error so the endpoint
//! cannot be used to enumerate accounts.

use std::sync::Arc;

use crate::domain::auth::{LoginCredentials, SignupDetails};
use crate::domain::ports::{
    PasswordHashError, PasswordHasher, TokenError, TokenIssuer, UserPersistenceError,
    UserRepository,
};
use crate::domain::token::{AccessToken, TokenPair};
use crate::domain::user::{NewUser, User, Username};
use crate::domain::Error;

/// Message returned for every failed credential check.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Authentication use-cases over injected ports.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => Error::conflict("Email already exists"),
        UserPersistenceError::DuplicateUsername => Error::conflict("Username already exists"),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    let PasswordHashError::Hashing { message } = error;
    Error::internal(message)
}

impl AuthService {
    /// Create a new service over the given ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Register a new account and return the stored record.
    ///
    /// The email existence check runs before hashing so a duplicate email
    /// answers the same conflict regardless of the rest of the payload; an
    /// insert race still surfaces as the same conflict via the repository's
    /// duplicate errors.
    pub async fn signup(&self, details: SignupDetails) -> Result<User, Error> {
        if self
            .users
            .email_exists(details.email())
            .await
            .map_err(map_user_persistence_error)?
        {
            return Err(Error::conflict("Email already exists"));
        }

        let password_hash = self.hasher.hash(details.password()).map_err(map_hash_error)?;
        let (username, email, role, first_name, last_name) = details.into_account_fields();
        let record = NewUser {
            username,
            email,
            role,
            first_name,
            last_name,
            password_hash,
        };

        self.users
            .insert(record)
            .await
            .map_err(map_user_persistence_error)
    }

    /// Authenticate credentials and mint a token pair.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, Error> {
        // A username that fails shape validation cannot name an account, so
        // it takes the same uniform rejection as an unknown one.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?;
        let Some(user) = user else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.tokens.mint_pair(&user).map_err(|error| match error {
            TokenError::Signing { message } => Error::internal(message),
            other => Error::internal(other.to_string()),
        })
    }

    /// Exchange a refresh token for a fresh access token.
    pub fn refresh(&self, refresh_token: &str) -> Result<AccessToken, Error> {
        self.tokens
            .refresh_access(refresh_token)
            .map_err(|error| match error {
                TokenError::Signing { message } => Error::internal(message),
                TokenError::Expired => Error::unauthorized("Refresh token expired"),
                TokenError::Invalid { .. } | TokenError::WrongTokenUse => {
                    Error::unauthorized("Invalid refresh token")
                }
            })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for signup/login/refresh flows over stub ports.
    use super::*;
    use crate::domain::ports::{
        FixturePasswordHasher, FixtureUserRepository, MockTokenIssuer, MockUserRepository,
    };
    use crate::domain::token::Identity;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    struct StubTokenIssuer;

    impl TokenIssuer for StubTokenIssuer {
        fn mint_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
            Ok(TokenPair {
                access: format!("access-for-{}", user.username()),
                refresh: format!("refresh-for-{}", user.username()),
            })
        }

        fn refresh_access(&self, refresh_token: &str) -> Result<AccessToken, TokenError> {
            match refresh_token {
                "valid-refresh" => Ok(AccessToken::new("fresh-access")),
                "expired-refresh" => Err(TokenError::expired()),
                "access-not-refresh" => Err(TokenError::wrong_token_use()),
                _ => Err(TokenError::invalid("unknown token")),
            }
        }

        fn verify_access(&self, _access_token: &str) -> Result<Identity, TokenError> {
            Err(TokenError::invalid("not used in these tests"))
        }
    }

    fn service_over(users: Arc<dyn UserRepository>) -> AuthService {
        AuthService::new(users, Arc::new(FixturePasswordHasher), Arc::new(StubTokenIssuer))
    }

    fn signup_details(username: &str, email: &str, password: &str) -> SignupDetails {
        SignupDetails::try_from_parts(username, email, password, None, "Ada", "Lovelace")
            .expect("valid signup details")
    }

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("valid credentials")
    }

    #[tokio::test]
    async fn signup_stores_hash_not_plaintext() {
        let service = service_over(Arc::new(FixtureUserRepository::new()));

        let user = service
            .signup(signup_details("ada", "ada@example.com", "secret"))
            .await
            .expect("signup succeeds");

        assert_ne!(user.password_hash().as_str(), "secret");
        assert_eq!(user.username().as_ref(), "ada");
    }

    #[tokio::test]
    async fn signup_with_existing_email_conflicts_regardless_of_other_fields() {
        let service = service_over(Arc::new(FixtureUserRepository::new()));
        service
            .signup(signup_details("ada", "ada@example.com", "secret"))
            .await
            .expect("first signup succeeds");

        let err = service
            .signup(signup_details("entirely-different", "ada@example.com", "other"))
            .await
            .expect_err("duplicate email must conflict");

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Email already exists");
    }

    #[tokio::test]
    async fn signup_with_existing_username_conflicts() {
        let service = service_over(Arc::new(FixtureUserRepository::new()));
        service
            .signup(signup_details("ada", "ada@example.com", "secret"))
            .await
            .expect("first signup succeeds");

        let err = service
            .signup(signup_details("ada", "other@example.com", "other"))
            .await
            .expect_err("duplicate username must conflict");

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Username already exists");
    }

    #[tokio::test]
    async fn login_returns_token_pair_for_valid_credentials() {
        let service = service_over(Arc::new(FixtureUserRepository::new()));
        service
            .signup(signup_details("ada", "ada@example.com", "secret"))
            .await
            .expect("signup succeeds");

        let pair = service
            .login(&credentials("ada", "secret"))
            .await
            .expect("login succeeds");

        assert_eq!(pair.access, "access-for-ada");
        assert_eq!(pair.refresh, "refresh-for-ada");
    }

    #[rstest]
    #[case("ada", "wrong-password")]
    #[case("nobody", "secret")]
    #[case("not a valid username!", "secret")]
    #[tokio::test]
    async fn login_failures_share_one_message(#[case] username: &str, #[case] password: &str) {
        let service = service_over(Arc::new(FixtureUserRepository::new()));
        service
            .signup(signup_details("ada", "ada@example.com", "secret"))
            .await
            .expect("signup succeeds");

        let err = service
            .login(&credentials(username, password))
            .await
            .expect_err("bad credentials must fail");

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn login_maps_repository_connection_failure() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| {
            Err(UserPersistenceError::connection("database unavailable"))
        });
        let service = service_over(Arc::new(users));

        let err = service
            .login(&credentials("ada", "secret"))
            .await
            .expect_err("connection failure must surface");

        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn signup_maps_repository_query_failure() {
        let mut users = MockUserRepository::new();
        users
            .expect_email_exists()
            .returning(|_| Err(UserPersistenceError::query("database query failed")));
        let service = service_over(Arc::new(users));

        let err = service
            .signup(signup_details("ada", "ada@example.com", "secret"))
            .await
            .expect_err("query failure must surface");

        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[rstest]
    #[case("expired-refresh", "Refresh token expired")]
    #[case("access-not-refresh", "Invalid refresh token")]
    #[case("garbage", "Invalid refresh token")]
    #[tokio::test]
    async fn refresh_rejections_map_to_unauthorized(
        #[case] token: &str,
        #[case] expected_message: &str,
    ) {
        let service = service_over(Arc::new(FixtureUserRepository::new()));

        let err = service.refresh(token).expect_err("bad refresh must fail");

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, expected_message);
    }

    #[tokio::test]
    async fn refresh_returns_new_access_token() {
        let service = service_over(Arc::new(FixtureUserRepository::new()));

        let access = service.refresh("valid-refresh").expect("refresh succeeds");

        assert_eq!(access.as_str(), "fresh-access");
    }

    #[tokio::test]
    async fn login_surfaces_signing_failure_as_internal() {
        let repository = Arc::new(FixtureUserRepository::new());
        let bootstrap = service_over(repository.clone());
        bootstrap
            .signup(signup_details("ada", "ada@example.com", "secret"))
            .await
            .expect("signup succeeds");

        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_mint_pair()
            .returning(|_| Err(TokenError::signing("key unavailable")));
        let service = AuthService::new(
            repository,
            Arc::new(FixturePasswordHasher),
            Arc::new(tokens),
        );

        let err = service
            .login(&credentials("ada", "secret"))
            .await
            .expect_err("signing failure must surface");

        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
