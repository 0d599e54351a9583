//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::WithRejection;
use kernel::error::app_error::AppError;
use platform::cookie::{delete_cookie_header, set_cookie_header};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthUser, ChangePasswordInput, ChangePasswordUseCase, SignInInput, SignInUseCase,
    SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse, SignUpRequest, SignUpResponse,
    SuccessResponse, UserDto,
};
use crate::presentation::extract::{ClientContext, extract_token};

/// Shared state for auth handlers
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ClientContext(client): ClientContext,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    sign_in(&state, req, client, None).await
}

/// POST /api/admin/auth
///
/// Same contract as `/api/auth/login`; non-admin accounts are refused with
/// the same 401 as a wrong password.
pub async fn admin_login<R>(
    State(state): State<AuthAppState<R>>,
    ClientContext(client): ClientContext,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    sign_in(&state, req, client, Some(UserRole::Admin)).await
}

async fn sign_in<R>(
    state: &AuthAppState<R>,
    req: LoginRequest,
    client: platform::client::ClientInfo,
    required_role: Option<UserRole>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(AuthError::MissingCredentials);
    };

    let mut use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    if let Some(role) = required_role {
        use_case = use_case.require_role(role);
    }

    let output = use_case.execute(SignInInput { email, password }, client).await?;

    let cookie = set_cookie_header(&state.config.cookie(), &output.token)
        .ok_or_else(|| AuthError::Internal("Token is not a valid cookie value".to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            user: UserDto::from(&output.account),
            token: output.token,
        }),
    )
        .into_response())
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Always 200 with a clearing cookie, whatever the request carried.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: AuthStore,
{
    let token = extract_token(&headers, &state.config.cookie_name);

    SignOutUseCase::new(state.repo.clone(), state.config.clone())
        .execute(token.as_deref())
        .await;

    let body = Json(SuccessResponse::OK);
    match delete_cookie_header(&state.config.cookie()) {
        Some(cookie) => (StatusCode::OK, [(header::SET_COOKIE, cookie)], body).into_response(),
        None => (StatusCode::OK, body).into_response(),
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<SignUpRequest>, AppError>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    R: AuthStore,
{
    let account = SignUpUseCase::new(state.repo.clone(), state.config.clone())
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            success: true,
            user: UserDto::from(&account),
        }),
    ))
}

// ============================================================================
// Current user (gated)
// ============================================================================

/// GET /api/auth/me
pub async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserDto::from(&user),
        expires_at: user.expires_at,
    })
}

/// POST /api/auth/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    user: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<ChangePasswordRequest>, AppError>,
) -> AuthResult<Json<SuccessResponse>>
where
    R: AuthStore,
{
    ChangePasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(
            &user.account_id,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(SuccessResponse::OK))
}
