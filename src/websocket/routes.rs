use crate::game::GameSnapshot;
use crate::server::GameServer;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use std::sync::Arc;

use super::handler::websocket_handler;

/// Create the Axum router with WebSocket support
pub fn create_router(cors_origins: &str, enable_reset: bool) -> axum::Router<Arc<GameServer>> {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    // Parse CORS origins
    let cors = if cors_origins == "*" {
        CorsLayer::permissive()
    } else {
        let origins: Vec<_> = cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("No valid CORS origins configured, using permissive CORS");
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let mut router = axum::Router::new()
        .route("/ws/{*path}", get(websocket_handler))
        .route("/health", get(health_check))
        .route("/state", get(state_handler))
        .route("/metrics", get(metrics_handler));

    if enable_reset {
        router = router.route("/reset", post(reset_handler));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Router for `server` using its own configuration.
pub fn app(server: Arc<GameServer>) -> axum::Router {
    let config = server.config();
    create_router(
        &config.server.cors_origins,
        config.server.enable_reset_endpoint,
    )
    .with_state(server)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Current game snapshot, same shape as the WebSocket state frame.
pub async fn state_handler(State(server): State<Arc<GameServer>>) -> Json<GameSnapshot> {
    Json(server.get_state().await)
}

pub async fn metrics_handler(State(server): State<Arc<GameServer>>) -> Json<serde_json::Value> {
    let snapshot = server.metrics().snapshot();
    Json(serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "sessions": server.sessions().len(),
        "counters": snapshot,
    }))
}

/// Start a fresh game; connected players receive the new state.
pub async fn reset_handler(State(server): State<Arc<GameServer>>) -> Json<GameSnapshot> {
    Json(server.reset().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::Player;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn state_endpoint_serves_snapshot() {
        let server = GameServer::new(Config::default());
        server.handle_move(Player::A, "H1:F").await.unwrap();

        let response = app(server)
            .oneshot(Request::get("/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["turn"], 1);
        assert_eq!(json["move_history"][0], "A:H1:F");
        assert_eq!(json["board"][2][1], "A-H1");
    }

    #[tokio::test]
    async fn reset_route_only_exists_when_enabled() {
        let request = || {
            Request::builder()
                .method(Method::POST)
                .uri("/reset")
                .body(Body::empty())
                .unwrap()
        };

        let disabled = app(GameServer::new(Config::default()))
            .oneshot(request())
            .await
            .unwrap();
        assert_eq!(disabled.status(), StatusCode::NOT_FOUND);

        let mut config = Config::default();
        config.server.enable_reset_endpoint = true;
        let server = GameServer::new(config);
        server.handle_move(Player::A, "H1:F").await.unwrap();

        let enabled = app(server.clone()).oneshot(request()).await.unwrap();
        assert_eq!(enabled.status(), StatusCode::OK);
        assert_eq!(body_json(enabled).await["turn"], 0);
        assert!(server.get_state().await.move_history.is_empty());
    }

    #[tokio::test]
    async fn health_and_metrics_respond() {
        let router = app(GameServer::new(Config::default()));

        let health = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let metrics = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(metrics).await;
        assert_eq!(json["sessions"], 0);
        assert_eq!(json["counters"]["movesAccepted"], 0);
    }
}
