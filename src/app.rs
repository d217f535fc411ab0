use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{elevated, protected, public};
use crate::state::AppState;

/// Build the full router. Each path is registered once with the access its
/// handler parameters demand.
pub fn app(state: AppState, cors_permissive: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Token required; admin required for writes
        .merge(user_routes())
        .merge(movie_routes())
        .with_state(state);

    let layers = ServiceBuilder::new().layer(TraceLayer::new_for_http());
    if cors_permissive {
        router.layer(layers.layer(CorsLayer::permissive()))
    } else {
        router.layer(layers)
    }
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(public::login_post))
        .route("/register", post(public::register_post))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(protected::users_get))
        .route("/users/:id", put(elevated::user_put).delete(elevated::user_delete))
}

fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(protected::movies_get).post(elevated::movie_post))
        .route("/movies/:id", put(elevated::movie_put).delete(elevated::movie_delete))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "moviedb-api",
        "version": version,
        "endpoints": {
            "public": "POST /login, POST /register",
            "protected": "GET /users?page=N, GET /movies?page=N (token)",
            "admin": "POST /movies, PUT|DELETE /users/:id, PUT|DELETE /movies/:id (token + admin role)",
            "health": "GET /health"
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(database) = state.database.as_ref() else {
        return (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "not configured" })),
        );
    };

    match database.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "database": "unavailable" })),
            )
        }
    }
}
