//! Router assembly
//!
//! The API lives under `/api/v1` and is wrapped in the cross-cutting tower
//! layers. Trailing slashes are trimmed before routing, so `/event/` and
//! `/event` reach the same handler.

use std::time::Duration;

use axum::{Router, middleware};
use tower::Layer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    constants::{API_BASE_PATH, MAX_REQUEST_BODY_BYTES},
    handlers,
    middleware::logging_middleware,
    state::AppState,
};

/// Build the application service
pub fn create_router(state: AppState) -> NormalizePath<Router> {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    let router = Router::new()
        .nest(API_BASE_PATH, handlers::routes(state.clone()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(timeout))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::AUTHORIZATION},
        response::Response,
    };
    use tower::ServiceExt;

    use crate::{
        models::user::fixtures::user_with_roles, services::AuthService, test_utils::lazy_state,
    };

    fn bearer(roles: &[&str]) -> String {
        let state = lazy_state();
        let (token, _) =
            AuthService::generate_access_token(&user_with_roles(roles), &state.config().jwt)
                .unwrap();
        format!("Bearer {token}")
    }

    async fn send(request: Request<Body>) -> Response {
        create_router(lazy_state()).oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = send(
            Request::get("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], true);
        assert_eq!(body["data"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let response = send(Request::get("/api/v1/event").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["status_code"], 401);
        assert_eq!(body["data"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let response = send(
            Request::get("/api/v1/event")
                .header(AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_trailing_slash_reaches_the_same_route() {
        let response = send(
            Request::get("/api/v1/event/")
                .header(AUTHORIZATION, bearer(&["jury"]))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        // Routed and authenticated, then refused for the role
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_event_creation_needs_staff() {
        let response = send(
            Request::post("/api/v1/event")
                .header(AUTHORIZATION, bearer(&["committee"]))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "title": "Cup",
                        "start_date": "2024-10-01",
                        "end_date": "2024-10-01",
                        "start_time": "08:00:00",
                        "end_time": "10:00:00",
                        "max_participants": 10,
                        "num_jury": 2,
                        "num_committee": 1,
                        "event_level": "regional"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_jury_cannot_add_jury() {
        let response = send(
            Request::post("/api/v1/event/7b0a4c52-3a8f-4a53-9a59-6f1e1cbd0f11/jury")
                .header(AUTHORIZATION, bearer(&["jury"]))
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"user":{"username":"judge1","password":"s3cret-pass","password2":"s3cret-pass"}}"#,
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_routes_need_staff() {
        let response = send(
            Request::get("/api/v1/admin/users")
                .header(AUTHORIZATION, bearer(&["committee", "jury"]))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = send(
            Request::get("/api/v1/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_served_over_http() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = create_router(lazy_state());
        tokio::spawn(async move {
            axum::serve(
                listener,
                axum::ServiceExt::<Request<Body>>::into_make_service(app),
            )
            .await
        });

        let response = reqwest::get(format!("http://{addr}/api/v1/health/"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status_code"], 200);
    }

    mod database {
        use super::*;
        use crate::{
            models::RosterKind,
            state::AppState,
            test_utils::{database::fresh_pool, seed, test_config},
        };

        async fn send_to(pool: &sqlx::PgPool, request: Request<Body>) -> Response {
            let state = AppState::new(pool.clone(), test_config("postgres://unused"));
            create_router(state).oneshot(request).await.unwrap()
        }

        fn add_request(uri: String, username: &str, password: &str) -> Request<Body> {
            let body = serde_json::json!({
                "user": {"username": username, "password": password, "password2": password}
            });
            Request::post(uri)
                .header(AUTHORIZATION, bearer(&["staff"]))
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        }

        #[tokio::test]
        #[ignore = "needs Docker"]
        async fn test_existing_username_answers_pending() {
            let pool = fresh_pool().await;
            let first = seed::event(&pool, 10, 2, 2).await;
            let second = seed::event(&pool, 10, 2, 2).await;
            seed::add_member(&pool, RosterKind::Jury, &first.id, "judge", false)
                .await
                .unwrap();

            // The password is not checked for an existing account
            let uri = format!("/api/v1/event/{}/jury", second.id);
            let response = send_to(&pool, add_request(uri.clone(), "judge", "x")).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(
                body,
                serde_json::json!({
                    "message": "Pending",
                    "data": {"yes": format!("event/{}/jury/?confirm=1", second.id)},
                    "status": false,
                    "status_code": 200
                })
            );

            let response = send_to(&pool, add_request(format!("{uri}?confirm=1"), "judge", "x")).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["status"], true);
            assert_eq!(body["data"]["username"], "judge");
        }

        #[tokio::test]
        #[ignore = "needs Docker"]
        async fn test_new_account_still_needs_a_valid_password() {
            let pool = fresh_pool().await;
            let event = seed::event(&pool, 10, 2, 2).await;

            let uri = format!("/api/v1/event/{}/jury", event.id);
            let response = send_to(&pool, add_request(uri, "newcomer", "x")).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        #[ignore = "needs Docker"]
        async fn test_full_roster_is_bad_request() {
            let pool = fresh_pool().await;
            let event = seed::event(&pool, 10, 2, 1).await;
            let uri = format!("/api/v1/event/{}/committee", event.id);

            let response = send_to(&pool, add_request(uri.clone(), "clerk1", "s3cret-pass")).await;
            assert_eq!(response.status(), StatusCode::CREATED);

            let response = send_to(&pool, add_request(uri, "clerk2", "s3cret-pass")).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["status"], false);
            assert_eq!(body["data"]["code"], "CAPACITY_EXCEEDED");
        }

        #[tokio::test]
        #[ignore = "needs Docker"]
        async fn test_roster_of_missing_event_is_not_found() {
            let pool = fresh_pool().await;
            let uri = format!("/api/v1/event/{}/committee", uuid::Uuid::new_v4());

            let response = send_to(&pool, add_request(uri, "clerk", "s3cret-pass")).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }
}
