//! Auth Middleware
//!
//! One gate for every privileged route:
//! 1. no token → 401
//! 2. bad signature, expired, or session revoked → 401
//! 3. role insufficient → 403
//! 4. otherwise the route runs with `AuthUser` in request extensions

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AuthStore;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::presentation::extract::extract_token;

/// Gate state: where sessions live, how tokens are checked, which role
/// the wrapped routes need.
pub struct AuthGate<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub required: UserRole,
}

// Manual impl: `R` itself need not be `Clone`
impl<R> Clone for AuthGate<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            required: self.required,
        }
    }
}

impl<R> AuthGate<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, required: UserRole) -> Self {
        Self {
            repo,
            config,
            required,
        }
    }

    pub fn admin(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self::new(repo, config, UserRole::Admin)
    }

    pub fn authenticated(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self::new(repo, config, UserRole::User)
    }

    /// Put every route currently in `router` behind this gate
    pub fn protect<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(from_fn_with_state(self, require_role::<R>))
    }
}

/// Middleware that requires a valid token, a live session and the gate's role
pub async fn require_role<R>(State(gate): State<AuthGate<R>>, mut req: Request, next: Next) -> Response
where
    R: AuthStore,
{
    let Some(token) = extract_token(req.headers(), &gate.config.cookie_name) else {
        return AuthError::Unauthorized.into_response();
    };

    let use_case = CheckSessionUseCase::new(gate.repo.clone(), gate.config.clone());
    match use_case.require(&token, gate.required).await {
        Ok(user) => {
            tracing::debug!(
                account_id = %user.account_id,
                role = %user.role,
                path = %req.uri().path(),
                "Gate passed"
            );
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
