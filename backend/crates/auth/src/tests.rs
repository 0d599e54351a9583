//! Router-level tests for the auth crate.
//! Everything runs against `MemoryAuthRepository`; no database needed.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use axum::routing::get;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::{SeedAccountInput, SeedAccountUseCase};
    use crate::{
        AuthConfig, AuthGate, AuthUser, MemoryAuthRepository, UserRole, admin_auth_router,
        auth_router,
    };

    pub const ADMIN_EMAIL: &str = "admin@x.com";
    pub const ADMIN_PASSWORD: &str = "admin123";
    pub const USER_EMAIL: &str = "reader@x.com";
    pub const USER_PASSWORD: &str = "reader-passphrase-42";

    pub struct TestApp {
        pub router: Router,
        pub repo: Arc<MemoryAuthRepository>,
        pub config: Arc<AuthConfig>,
    }

    async fn admin_ping(user: AuthUser) -> String {
        format!("hello {}", user.email)
    }

    pub async fn app() -> TestApp {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::development());

        let seed = SeedAccountUseCase::new(repo.clone(), config.clone());
        for (email, password, name, role) in [
            (ADMIN_EMAIL, ADMIN_PASSWORD, "Admin", UserRole::Admin),
            (USER_EMAIL, USER_PASSWORD, "Reader", UserRole::User),
        ] {
            seed.execute(SeedAccountInput {
                email: email.into(),
                password: password.into(),
                name: name.into(),
                role,
            })
            .await
            .unwrap();
        }

        let gated = AuthGate::admin(repo.clone(), config.clone())
            .protect(Router::new().route("/ping", get(admin_ping)));

        let router = Router::new()
            .nest("/api/auth", auth_router(repo.clone(), config.clone()))
            .nest(
                "/api/admin",
                admin_auth_router(repo.clone(), config.clone()).merge(gated),
            );

        TestApp {
            router,
            repo,
            config,
        }
    }

    impl TestApp {
        pub async fn send(&self, req: Request<Body>) -> Response<Body> {
            self.router.clone().oneshot(req).await.unwrap()
        }

        /// Log in and return the `name=value` cookie pair
        pub async fn login(&self, path: &str, email: &str, password: &str) -> String {
            let resp = self
                .send(post_json(
                    path,
                    serde_json::json!({"email": email, "password": password}),
                ))
                .await;
            assert_eq!(resp.status(), 200, "login to {path} as {email} failed");
            cookie_pair(&resp)
        }
    }

    pub fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn post_with_cookie(uri: &str, cookie: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, cookie)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn set_cookie(resp: &Response<Body>) -> String {
        resp.headers()
            .get(header::SET_COOKIE)
            .expect("Set-Cookie header")
            .to_str()
            .unwrap()
            .to_string()
    }

    pub fn cookie_pair(resp: &Response<Body>) -> String {
        set_cookie(resp).split(';').next().unwrap().to_string()
    }

    pub async fn body_json(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use crate::application::TokenService;
    use crate::UserRole;

    #[tokio::test]
    async fn test_admin_login_sets_cookie_and_returns_token() {
        let app = app().await;
        let resp = app
            .send(post_json(
                "/api/auth/login",
                serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            ))
            .await;

        assert_eq!(resp.status(), 200);
        let cookie = set_cookie(&resp);
        assert!(cookie.starts_with("auth-token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));

        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], ADMIN_EMAIL);
        assert_eq!(body["user"]["role"], "ADMIN");
        assert!(body["user"].get("passwordHash").is_none());

        let token = body["token"].as_str().unwrap();
        let verified = TokenService::new(app.config.clone()).verify(token).unwrap();
        assert_eq!(verified.role, UserRole::Admin);
        assert_eq!(verified.email, ADMIN_EMAIL);
        assert_eq!(app.repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_email_is_case_insensitive() {
        let app = app().await;
        app.login("/api/auth/login", "ADMIN@X.com", ADMIN_PASSWORD).await;
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_identical() {
        let app = app().await;

        let wrong_password = app
            .send(post_json(
                "/api/auth/login",
                serde_json::json!({"email": ADMIN_EMAIL, "password": "not-the-password"}),
            ))
            .await;
        let unknown_email = app
            .send(post_json(
                "/api/auth/login",
                serde_json::json!({"email": "nobody@x.com", "password": "not-the-password"}),
            ))
            .await;

        assert_eq!(wrong_password.status(), 401);
        assert_eq!(unknown_email.status(), 401);
        assert!(wrong_password.headers().get("set-cookie").is_none());
        assert!(unknown_email.headers().get("set-cookie").is_none());

        let a = body_json(wrong_password).await;
        let b = body_json(unknown_email).await;
        assert_eq!(a, b);
        assert_eq!(a["error"], "Invalid credentials");
        assert_eq!(app.repo.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let app = app().await;
        for body in [
            serde_json::json!({}),
            serde_json::json!({"email": ADMIN_EMAIL}),
            serde_json::json!({"password": ADMIN_PASSWORD}),
            serde_json::json!({"email": "", "password": ""}),
        ] {
            let resp = app.send(post_json("/api/auth/login", body)).await;
            assert_eq!(resp.status(), 400);
            assert_eq!(
                body_json(resp).await["error"],
                "Email and password are required"
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app().await;
        let req = axum::http::Request::post("/api/auth/login")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let resp = app.send(req).await;
        assert_eq!(resp.status(), 400);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_admin_login_refuses_user_accounts_generically() {
        let app = app().await;
        let resp = app
            .send(post_json(
                "/api/admin/auth",
                serde_json::json!({"email": USER_EMAIL, "password": USER_PASSWORD}),
            ))
            .await;
        assert_eq!(resp.status(), 401);
        assert_eq!(body_json(resp).await["error"], "Invalid credentials");

        app.login("/api/admin/auth", ADMIN_EMAIL, ADMIN_PASSWORD).await;
    }
}

#[cfg(test)]
mod gate_tests {
    use super::support::*;
    use crate::application::TokenService;
    use crate::domain::entity::auth_session::AuthSession;
    use crate::domain::repository::{AccountRepository, AuthSessionRepository};
    use crate::domain::value_object::email::Email;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_admin_scenario() {
        let app = app().await;
        let cookie = app.login("/api/auth/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;

        let resp = app.send(get_with_cookie("/api/admin/ping", Some(&cookie))).await;
        assert_eq!(resp.status(), 200);

        let resp = app.send(get_with_cookie("/api/admin/ping", None)).await;
        assert_eq!(resp.status(), 401);
        assert_eq!(body_json(resp).await["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_user_token_is_forbidden() {
        let app = app().await;
        let cookie = app.login("/api/auth/login", USER_EMAIL, USER_PASSWORD).await;

        let resp = app.send(get_with_cookie("/api/admin/ping", Some(&cookie))).await;
        assert_eq!(resp.status(), 403);
        assert_eq!(body_json(resp).await["error"], "Forbidden");

        // Any authenticated role may use /me
        let resp = app.send(get_with_cookie("/api/auth/me", Some(&cookie))).await;
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        assert_eq!(body["user"]["role"], "USER");
        assert!(body["expiresAt"].is_string());
    }

    #[tokio::test]
    async fn test_bearer_header_accepted() {
        let app = app().await;
        let cookie = app.login("/api/auth/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let token = cookie.trim_start_matches("auth-token=");

        let req = axum::http::Request::get("/api/admin/ping")
            .header("authorization", format!("Bearer {token}"))
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(app.send(req).await.status(), 200);
    }

    #[tokio::test]
    async fn test_garbage_and_tampered_tokens_are_unauthorized() {
        let app = app().await;
        let cookie = app.login("/api/auth/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;

        // Flip the first character of the signature segment
        let split = cookie.rfind('.').unwrap() + 1;
        let first = cookie[split..].chars().next().unwrap();
        let tampered = format!(
            "{}{}{}",
            &cookie[..split],
            if first == 'A' { 'B' } else { 'A' },
            &cookie[split + 1..]
        );

        for bad in ["auth-token=garbage".to_string(), tampered] {
            let resp = app.send(get_with_cookie("/api/admin/ping", Some(&bad))).await;
            assert_eq!(resp.status(), 401);
        }
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let app = app().await;
        let account = app
            .repo
            .find_by_email(&Email::new(ADMIN_EMAIL).unwrap())
            .await
            .unwrap()
            .unwrap();

        // Session row still live, token itself past its exp
        let session = AuthSession::new(
            account.account_id,
            Duration::days(30),
            &platform::client::ClientInfo::default(),
        );
        app.repo.put_session(session.clone()).await;
        let token = TokenService::new(app.config.clone())
            .issue_at(&account, &session, Utc::now() - Duration::days(8))
            .unwrap();

        let resp = app
            .send(get_with_cookie(
                "/api/admin/ping",
                Some(&format!("auth-token={token}")),
            ))
            .await;
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn test_expired_session_is_unauthorized() {
        let app = app().await;
        let cookie = app.login("/api/auth/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let token = cookie.trim_start_matches("auth-token=");
        let sid = TokenService::new(app.config.clone())
            .verify(token)
            .unwrap()
            .session_id;

        let mut session = app.repo.find_active(&sid).await.unwrap().unwrap();
        session.expires_at = Utc::now() - Duration::seconds(1);
        app.repo.put_session(session).await;

        let resp = app.send(get_with_cookie("/api/admin/ping", Some(&cookie))).await;
        assert_eq!(resp.status(), 401);
        assert_eq!(app.repo.cleanup_expired().await.unwrap(), 1);
    }
}

#[cfg(test)]
mod logout_tests {
    use super::support::*;

    #[tokio::test]
    async fn test_logout_revokes_session() {
        let app = app().await;
        let cookie = app.login("/api/auth/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;

        let resp = app
            .send(post_with_cookie("/api/auth/logout", &cookie, serde_json::json!({})))
            .await;
        assert_eq!(resp.status(), 200);
        assert_eq!(app.repo.session_count().await, 0);

        // The signature is still fine, but the session is gone
        let resp = app.send(get_with_cookie("/api/admin/ping", Some(&cookie))).await;
        assert_eq!(resp.status(), 401);
    }

    #[tokio::test]
    async fn test_logout_twice_is_identical() {
        let app = app().await;
        let cookie = app.login("/api/auth/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;

        let first = app
            .send(post_with_cookie("/api/auth/logout", &cookie, serde_json::json!({})))
            .await;
        let second = app
            .send(post_with_cookie("/api/auth/logout", &cookie, serde_json::json!({})))
            .await;

        assert_eq!(first.status(), 200);
        assert_eq!(second.status(), 200);
        let (c1, c2) = (set_cookie(&first), set_cookie(&second));
        assert_eq!(c1, c2);
        assert!(c1.contains("Max-Age=0"));
        assert_eq!(body_json(first).await, body_json(second).await);
    }

    #[tokio::test]
    async fn test_logout_without_cookie_succeeds() {
        let app = app().await;
        let req = axum::http::Request::post("/api/auth/logout")
            .body(axum::body::Body::empty())
            .unwrap();
        let resp = app.send(req).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_json(resp).await["success"], true);
    }
}

#[cfg(test)]
mod account_tests {
    use super::support::*;

    #[tokio::test]
    async fn test_sign_up_then_login() {
        let app = app().await;
        let resp = app
            .send(post_json(
                "/api/auth/signup",
                serde_json::json!({
                    "email": "new@x.com",
                    "password": "a sturdy passphrase",
                    "name": "Newcomer"
                }),
            ))
            .await;
        assert_eq!(resp.status(), 201);
        let body = body_json(resp).await;
        assert_eq!(body["user"]["role"], "USER");

        app.login("/api/auth/login", "new@x.com", "a sturdy passphrase")
            .await;
    }

    #[tokio::test]
    async fn test_sign_up_conflict_and_validation() {
        let app = app().await;

        let taken = app
            .send(post_json(
                "/api/auth/signup",
                serde_json::json!({"email": ADMIN_EMAIL, "password": "another passphrase", "name": "X"}),
            ))
            .await;
        assert_eq!(taken.status(), 409);

        let weak = app
            .send(post_json(
                "/api/auth/signup",
                serde_json::json!({"email": "weak@x.com", "password": "password", "name": "X"}),
            ))
            .await;
        assert_eq!(weak.status(), 400);

        let bad_email = app
            .send(post_json(
                "/api/auth/signup",
                serde_json::json!({"email": "not-an-email", "password": "a sturdy passphrase", "name": "X"}),
            ))
            .await;
        assert_eq!(bad_email.status(), 400);
    }

    #[tokio::test]
    async fn test_change_password() {
        let app = app().await;
        let cookie = app.login("/api/auth/login", USER_EMAIL, USER_PASSWORD).await;

        let wrong = app
            .send(post_with_cookie(
                "/api/auth/password",
                &cookie,
                serde_json::json!({"currentPassword": "nope", "newPassword": "brand new passphrase"}),
            ))
            .await;
        assert_eq!(wrong.status(), 401);

        let ok = app
            .send(post_with_cookie(
                "/api/auth/password",
                &cookie,
                serde_json::json!({"currentPassword": USER_PASSWORD, "newPassword": "brand new passphrase"}),
            ))
            .await;
        assert_eq!(ok.status(), 200);

        app.login("/api/auth/login", USER_EMAIL, "brand new passphrase")
            .await;
        let old = app
            .send(post_json(
                "/api/auth/login",
                serde_json::json!({"email": USER_EMAIL, "password": USER_PASSWORD}),
            ))
            .await;
        assert_eq!(old.status(), 401);
    }

    #[tokio::test]
    async fn test_password_change_requires_login() {
        let app = app().await;
        let resp = app
            .send(post_json(
                "/api/auth/password",
                serde_json::json!({"currentPassword": "a", "newPassword": "b"}),
            ))
            .await;
        assert_eq!(resp.status(), 401);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::AuthError;
    use kernel::error::kind::ErrorKind;
    use platform::password::PasswordPolicyError;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AuthError::MissingCredentials.kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::Unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::Forbidden.kind(), ErrorKind::Forbidden);
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(
            AuthError::PasswordPolicy(PasswordPolicyError::CommonPattern).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            AuthError::Internal("boom".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_value_object_errors_become_bad_request() {
        let err: AuthError = kernel::error::app_error::AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::InvalidInput(ref m) if m == "Invalid email format"));
    }

    #[test]
    fn test_internal_message_is_not_the_database_text() {
        let app_err = AuthError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(app_err.status_code(), 503);
    }
}
