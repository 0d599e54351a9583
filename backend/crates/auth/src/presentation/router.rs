//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::AuthGate;

/// Routes under `/api/auth`
///
/// `/login`, `/logout` and `/signup` are open; `/me` and `/password` need
/// any authenticated account.
pub fn auth_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: AuthStore,
{
    let gate = AuthGate::authenticated(repo.clone(), config.clone());
    let state = AuthAppState { repo, config };

    let protected = gate.protect(
        Router::<AuthAppState<R>>::new()
            .route("/me", get(handlers::me))
            .route("/password", post(handlers::change_password::<R>)),
    );

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/signup", post(handlers::sign_up::<R>))
        .merge(protected)
        .with_state(state)
}

/// `POST /auth`, meant to be nested under `/api/admin` next to the gated
/// admin routes. The route itself is open.
pub fn admin_auth_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: AuthStore,
{
    Router::new()
        .route("/auth", post(handlers::admin_login::<R>))
        .with_state(AuthAppState { repo, config })
}
