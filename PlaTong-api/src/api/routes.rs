use axum::{
    routing::{get, post},
    Extension, Router,
};
use tracing::debug;

use crate::api::handlers::{blood_pressure, content, health, tutorial};
use crate::api::middleware::configure_security;
use crate::openapi::configure_swagger_routes;
use crate::state::AppState;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    let health_service = state.health_service();

    let api_routes = Router::new()
        .route("/home", get(content::get_home))
        .route("/stats", get(content::get_stats))
        .route("/knowledge", get(content::get_knowledge))
        .route(
            "/bloodpressure/interpret",
            post(blood_pressure::interpret_blood_pressure),
        )
        // Define specific routes before parametrized routes to avoid conflicts
        .route("/tutorial/steps", get(content::get_tutorial_steps))
        .route("/tutorial/sessions", post(tutorial::create_session))
        .route(
            "/tutorial/sessions/:id",
            get(tutorial::get_session).delete(tutorial::delete_session),
        )
        .route("/tutorial/sessions/:id/commands", post(tutorial::apply_command))
        .route(
            "/tutorial/sessions/:id/audio-events",
            post(tutorial::report_audio_event),
        );

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state);

    debug!("API routes nested");

    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    let app = configure_security(app);
    debug!("Security configuration applied");

    health::initialize_server_start_time();

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::tests::{body_json, test_state};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_route() {
        let response = create_app(test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["environment"], "test");
    }

    #[tokio::test]
    async fn test_session_route_round_trip() {
        let app = create_app(test_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/tutorial/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/tutorial/sessions/{}/commands", id))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"command":"start"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["session"]["phase"], "in_progress");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = create_app(test_state())
            .oneshot(Request::builder().uri("/api/v1/appointments").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
