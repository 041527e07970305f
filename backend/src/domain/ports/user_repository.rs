//! Port abstraction for user persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, NewUser, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Insert rejected because the email is already registered.
        DuplicateEmail => "email already exists",
        /// Insert rejected because the username is already registered.
        DuplicateUsername => "username already exists",
    }
}

/// Persistence port for user accounts.
///
/// Accounts are immutable after creation in this system, so the port exposes
/// no update or delete operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, assigning its identifier.
    ///
    /// Uniqueness races surface as [`UserPersistenceError::DuplicateEmail`]
    /// or [`UserPersistenceError::DuplicateUsername`].
    async fn insert(&self, record: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch an account by login name.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Report whether an account with the given email already exists.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;
}

/// In-memory user repository used by tests and the dev-mode server.
///
/// Enforces the same email/username uniqueness as the PostgreSQL adapter.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    users: Mutex<Vec<User>>,
}

impl FixtureUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts, for test assertions.
    pub fn len(&self) -> usize {
        self.users.lock().expect("user store lock").len()
    }

    /// Whether no accounts are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, record: NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self.users.lock().expect("user store lock");
        if users.iter().any(|user| user.email() == &record.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        if users.iter().any(|user| user.username() == &record.username) {
            return Err(UserPersistenceError::duplicate_username());
        }
        let user = User::new(UserId::random(), record);
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().expect("user store lock");
        Ok(users.iter().find(|user| user.username() == username).cloned())
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let users = self.users.lock().expect("user store lock");
        Ok(users.iter().any(|user| user.email() == email))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the fixture repository.
    use super::*;
    use crate::domain::user::{PasswordHashString, PersonName, Role};

    fn record(username: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::new(username).expect("valid username"),
            email: EmailAddress::new(email).expect("valid email"),
            role: Role::User,
            first_name: PersonName::first("Ada").expect("valid first name"),
            last_name: PersonName::last("Lovelace").expect("valid last name"),
            password_hash: PasswordHashString::new("$argon2id$stub"),
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repository = FixtureUserRepository::new();
        let inserted = repository
            .insert(record("ada", "ada@example.com"))
            .await
            .expect("insert succeeds");

        let found = repository
            .find_by_username(inserted.username())
            .await
            .expect("lookup succeeds")
            .expect("account present");
        assert_eq!(found, inserted);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let repository = FixtureUserRepository::new();
        repository
            .insert(record("ada", "ada@example.com"))
            .await
            .expect("first insert succeeds");

        let err = repository
            .insert(record("different", "ada@example.com"))
            .await
            .expect_err("duplicate email must fail");
        assert_eq!(err, UserPersistenceError::DuplicateEmail);
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_username() {
        let repository = FixtureUserRepository::new();
        repository
            .insert(record("ada", "ada@example.com"))
            .await
            .expect("first insert succeeds");

        let err = repository
            .insert(record("ada", "other@example.com"))
            .await
            .expect_err("duplicate username must fail");
        assert_eq!(err, UserPersistenceError::DuplicateUsername);
    }

    #[tokio::test]
    async fn email_exists_reflects_stored_accounts() {
        let repository = FixtureUserRepository::new();
        let email = EmailAddress::new("ada@example.com").expect("valid email");
        assert!(!repository.email_exists(&email).await.expect("query succeeds"));

        repository
            .insert(record("ada", "ada@example.com"))
            .await
            .expect("insert succeeds");
        assert!(repository.email_exists(&email).await.expect("query succeeds"));
    }
}
