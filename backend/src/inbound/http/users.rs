//! Account API handlers.
//!
//! ```text
//! POST /signup        {"username":"ada","email":"ada@x.com","password":"pw", ...}
//! POST /login         {"username":"ada","password":"pw"}
//! POST /token/refresh {"refresh":"<refresh token>"}
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError,
    TokenPair, UserProfile, UserValidationError,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;
use crate::inbound::http::ApiResult;

/// Signup request body for `POST /signup`.
///
/// Accepts both camelCase and the snake_case field names (`first_name`,
/// `user_type`) used by existing clients. A missing role defaults to `User`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "user_type", alias = "userType")]
    pub role: Option<String>,
    #[serde(default, alias = "first_name")]
    pub first_name: String,
    #[serde(default, alias = "last_name")]
    pub last_name: String,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = SignupValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.username,
            &value.email,
            &value.password,
            value.role.as_deref(),
            &value.first_name,
            &value.last_name,
        )
    }
}

/// Successful signup response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The created account, password excluded.
    pub data: UserProfile,
}

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Freshly minted token pair.
    pub data: TokenPair,
}

/// Refresh request body for `POST /token/refresh`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: String,
}

/// Successful refresh response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    /// Freshly minted access token.
    pub access: String,
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    match err {
        SignupValidationError::EmptyPassword => {
            field_error("password must not be empty", "password", "empty_password")
        }
        SignupValidationError::Field(field) => map_user_validation_error(field),
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let message = err.to_string();
    match err {
        UserValidationError::EmptyUsername => field_error(message, "username", "empty_username"),
        UserValidationError::UsernameTooLong { .. } => {
            field_error(message, "username", "too_long")
        }
        UserValidationError::UsernameInvalidCharacters => {
            field_error(message, "username", "invalid_characters")
        }
        UserValidationError::EmptyEmail => field_error(message, "email", "empty_email"),
        UserValidationError::EmailTooLong { .. } => field_error(message, "email", "too_long"),
        UserValidationError::InvalidEmail => field_error(message, "email", "invalid_email"),
        UserValidationError::EmptyFirstName => {
            field_error(message, "firstName", "missing_field")
        }
        UserValidationError::EmptyLastName => field_error(message, "lastName", "missing_field"),
        UserValidationError::UnknownRole { .. } => field_error(message, "role", "unknown_role"),
        UserValidationError::InvalidId => Error::invalid_request(message),
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            field_error("username must not be empty", "username", "empty_username")
        }
        LoginValidationError::EmptyPassword => {
            field_error("password must not be empty", "password", "empty_password")
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid payload or duplicate email/username", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details =
        SignupDetails::try_from(payload.into_inner()).map_err(map_signup_validation_error)?;
    let user = state.auth.signup(details).await?;
    Ok(HttpResponse::Created().json(SignupResponse {
        message: "User registered successfully".to_owned(),
        data: user.profile(),
    }))
}

/// Authenticate and mint an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_validation_error)?;
    let pair = state.auth.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: "Login successful".to_owned(),
        data: pair,
    }))
}

/// Mint a new access token from a refresh token.
#[utoipa::path(
    post,
    path = "/token/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid or expired refresh token", body = Error)
    ),
    tags = ["auth"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/token/refresh")]
pub async fn refresh_token(
    state: web::Data<HttpState>,
    payload: web::Json<RefreshRequest>,
) -> ApiResult<web::Json<RefreshResponse>> {
    let payload = payload.into_inner();
    if payload.refresh.is_empty() {
        return Err(field_error(
            "refresh must not be empty",
            "refresh",
            "missing_field",
        ));
    }
    let access = state.auth.refresh(&payload.refresh)?;
    Ok(web::Json(RefreshResponse {
        access: access.into(),
    }))
}
