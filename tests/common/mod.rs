// Shared test helper: an in-process stub of the API under test, serving the
// four endpoints the harness drives. Feedback returns 429 for every third
// request so the allowed-status handling gets exercised.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Default)]
struct StubState {
    feedback_hits: Arc<AtomicUsize>,
}

#[derive(serde::Deserialize)]
struct LoginParams {
    login: String,
    password: String,
}

#[derive(serde::Deserialize)]
#[allow(dead_code)]
struct FeedbackBody {
    name: String,
    message: String,
}

async fn status_handler() -> StatusCode {
    StatusCode::OK
}

async fn login_handler(Query(params): Query<LoginParams>) -> StatusCode {
    if params.login == "test" && params.password == "test" {
        StatusCode::OK
    } else {
        StatusCode::FORBIDDEN
    }
}

async fn feedback_handler(
    State(state): State<StubState>,
    Json(body): Json<FeedbackBody>,
) -> StatusCode {
    if body.name.is_empty() {
        return StatusCode::BAD_REQUEST;
    }
    let n = state.feedback_hits.fetch_add(1, Ordering::Relaxed);
    if n % 3 == 2 {
        StatusCode::TOO_MANY_REQUESTS
    } else {
        StatusCode::OK
    }
}

async fn auth_handler(headers: HeaderMap) -> StatusCode {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if token == Some("valid_token") {
        StatusCode::OK
    } else {
        StatusCode::FORBIDDEN
    }
}

/// Binds the stub on an ephemeral loopback port and returns its base URL.
#[allow(dead_code)]
pub async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/status", get(status_handler))
        .route("/login/", get(login_handler))
        .route("/feedback/", post(feedback_handler))
        .route("/auth/", get(auth_handler))
        .with_state(StubState::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    format!("http://{}", addr)
}

/// Binds and immediately drops a loopback listener, yielding a base URL that
/// refuses connections.
#[allow(dead_code)]
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe local addr");
    drop(listener);
    format!("http://{}", addr)
}
