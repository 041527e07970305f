//! Authentication primitives: login credentials and signup details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service. Plaintext
//! passwords are held in [`Zeroizing`] buffers so they are wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{
    EmailAddress, PersonName, Role, Username, UserValidationError,
};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty after trimming.
/// - `password` is non-empty but keeps caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// One of the account fields failed validation.
    Field(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for SignupValidationError {}

impl From<UserValidationError> for SignupValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Field(value)
    }
}

/// Validated signup request, ready for the auth service.
///
/// The plaintext password never leaves this struct except through
/// [`SignupDetails::password`], which the service feeds straight into the
/// hashing port.
#[derive(Debug, Clone)]
pub struct SignupDetails {
    username: Username,
    email: EmailAddress,
    role: Role,
    first_name: PersonName,
    last_name: PersonName,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Validate raw signup fields. A missing role defaults to [`Role::User`].
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, SignupValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(SignupValidationError::EmptyPassword);
        }
        let role = role.map(Role::parse).transpose()?.unwrap_or_default();
        let first_name = PersonName::first(first_name)?;
        let last_name = PersonName::last(last_name)?;
        Ok(Self {
            username,
            email,
            role,
            first_name,
            last_name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// First name.
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Last name.
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Plaintext password, for hashing only.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Split into the validated name/role components, dropping the password.
    pub fn into_account_fields(self) -> (Username, EmailAddress, Role, PersonName, PersonName) {
        (
            self.username,
            self.email,
            self.role,
            self.first_name,
            self.last_name,
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ada  ", "secret")]
    #[case("ada", "correct horse battery staple")]
    fn valid_login_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    fn signup(
        username: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<SignupDetails, SignupValidationError> {
        SignupDetails::try_from_parts(username, email, password, role, "Ada", "Lovelace")
    }

    #[test]
    fn signup_defaults_role_to_user() {
        let details = signup("ada", "ada@example.com", "pw", None).expect("valid signup");
        assert_eq!(details.role(), Role::User);
    }

    #[test]
    fn signup_accepts_explicit_admin_role() {
        let details = signup("ada", "ada@example.com", "pw", Some("Admin")).expect("valid signup");
        assert_eq!(details.role(), Role::Admin);
    }

    #[test]
    fn signup_rejects_unknown_role() {
        let err = signup("ada", "ada@example.com", "pw", Some("root")).expect_err("unknown role");
        assert!(matches!(
            err,
            SignupValidationError::Field(UserValidationError::UnknownRole { .. })
        ));
    }

    #[test]
    fn signup_rejects_blank_password() {
        let err = signup("ada", "ada@example.com", "", None).expect_err("blank password");
        assert_eq!(err, SignupValidationError::EmptyPassword);
    }

    #[test]
    fn signup_rejects_blank_names() {
        let err =
            SignupDetails::try_from_parts("ada", "ada@example.com", "pw", None, "  ", "Lovelace")
                .expect_err("blank first name");
        assert!(matches!(
            err,
            SignupValidationError::Field(UserValidationError::EmptyFirstName)
        ));
    }
}
