use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use service::user::{repo::seaorm::SeaOrmUserRepository, validator::ValidationPolicy, UserService};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::openapi;

pub mod users;

/// Shared handler state; the service is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService<SeaOrmUserRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, policy: ValidationPolicy) -> Self {
        let repo = Arc::new(SeaOrmUserRepository::new(db));
        Self { users: Arc::new(UserService::new(repo, policy)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let users = Router::new()
        .route("/users", post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user).post(users::update_user).delete(users::delete_user),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .merge(users)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = models::db::connect_in_memory().await.expect("in-memory db");
        build_router(AppState::new(db, ValidationPolicy::default()), CorsLayer::very_permissive())
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let res = app().await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["status"], "ok");
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let res = app().await
            .oneshot(Request::builder().uri("/users/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["message"], "Invalid id format: abc");
    }

    #[tokio::test]
    async fn create_without_email_is_bad_request() {
        let res = app().await
            .oneshot(Request::builder().method("POST").uri("/users?name=Ivan").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["message"], "Invalid user name=Ivan, email=");
    }

    #[tokio::test]
    async fn malformed_query_gets_json_message() {
        let res = app().await
            .oneshot(Request::builder().method("POST").uri("/users?name=a&name=b&email=x@y.z").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert!(body["message"].as_str().is_some_and(|m| m.contains("duplicate field")), "{body}");
    }

    #[tokio::test]
    async fn non_utf8_path_id_gets_json_message() {
        let res = app().await
            .oneshot(Request::builder().uri("/users/%FF").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert!(body["message"].as_str().is_some_and(|m| m.contains("Invalid UTF-8")), "{body}");
    }

    #[tokio::test]
    async fn malformed_update_query_gets_json_message() {
        let res = app().await
            .oneshot(Request::builder().method("POST").uri("/users/1?email=a&email=b&name=x").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(res).await["message"].is_string());
    }

    #[tokio::test]
    async fn openapi_lists_user_paths() {
        let res = app().await
            .oneshot(Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let doc = body_json(res).await;
        assert!(doc["paths"]["/users"].is_object());
        assert!(doc["paths"]["/users/{id}"].is_object());
    }
}
