//! Shared harness for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack (guard, CORS, request ID, timeout, panic recovery) that
//! production uses, with a fixed in-memory identity provider.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use bbuilds_api::config::{IdentityConfig, ServerConfig, SessionConfig};
use bbuilds_api::auth::session::generate_session_token;
use bbuilds_api::identity::{IdentityUser, StaticIdentity};
use bbuilds_api::middleware::guard::access_guard;
use bbuilds_api::routes;
use bbuilds_api::state::AppState;
use bbuilds_api::handlers;
use bbuilds_db::models::profile::SyncProfile;
use bbuilds_db::repositories::ProfileRepo;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@bbuilds.org";
pub const ADMIN_ID: &str = "user_admin";
pub const CLIENT_ID: &str = "user_client_1";
pub const CLIENT_EMAIL: &str = "client1@example.com";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        admin_email: ADMIN_EMAIL.to_string(),
        static_dir: PathBuf::from("public"),
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
        },
        identity: IdentityConfig {
            base_url: "http://identity.invalid".to_string(),
            secret_key: "test-key".to_string(),
        },
    }
}

/// Identity fixture: the admin plus one client, both resolvable by id.
pub fn test_identity() -> StaticIdentity {
    StaticIdentity::new([
        IdentityUser {
            id: ADMIN_ID.to_string(),
            email: ADMIN_EMAIL.to_string(),
            first_name: Some("Basanth".to_string()),
            last_name: None,
            avatar_url: None,
        },
        IdentityUser {
            id: CLIENT_ID.to_string(),
            email: CLIENT_EMAIL.to_string(),
            first_name: Some("Casey".to_string()),
            last_name: Some("Client".to_string()),
            avatar_url: Some("https://img.example.com/casey.png".to_string()),
        },
    ])
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        identity: Arc::new(test_identity()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(handlers::health::router())
        .nest("/api", routes::api_routes())
        .layer(from_fn_with_state(state.clone(), access_guard))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Admin session token carrying the email claim.
pub fn admin_token() -> String {
    generate_session_token(ADMIN_ID, Some(ADMIN_EMAIL), TEST_SECRET, 15).unwrap()
}

/// Admin session token with no email claim; forces the provider lookup.
pub fn admin_token_without_email() -> String {
    generate_session_token(ADMIN_ID, None, TEST_SECRET, 15).unwrap()
}

/// Session token for the test client.
pub fn client_token() -> String {
    generate_session_token(CLIENT_ID, Some(CLIENT_EMAIL), TEST_SECRET, 15).unwrap()
}

/// Session token for a user the identity provider has never heard of, with
/// no email claim; resolution always fails.
pub fn unresolvable_token() -> String {
    generate_session_token("user_ghost", None, TEST_SECRET, 15).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Insert a profile row directly, as a completed sync would.
pub async fn seed_profile(pool: &PgPool, identity_id: &str, email: &str) {
    ProfileRepo::upsert(
        pool,
        &SyncProfile {
            identity_id: identity_id.to_string(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            avatar_url: None,
        },
    )
    .await
    .expect("profile seed should succeed");
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::get(path)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_with_cookie(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::get(path)
            .header("cookie", format!("__session={token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::post(path)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::post(path)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn patch_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::patch(path)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::delete(path)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
