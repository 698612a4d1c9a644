//! HTTP API for EduPass: license login and gated photo tutoring.

pub mod config;
pub mod cookies;
pub mod session;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use edupass_license::{LicenseError, Verdict};
use edupass_session::LicenseGate;
use edupass_tutor::{Lesson, Subject, TutorError, TutorPipeline, TutorRequest, SUBJECTS};
use serde::{Deserialize, Serialize};
use session::{RequestSession, SessionRegistry};
use std::sync::Arc;
use tracing::{info, warn};

pub use config::AppConfig;

/// Largest accepted request body; photos arrive base64-encoded.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    gate: Arc<LicenseGate>,
    pipeline: TutorPipeline,
    sessions: SessionRegistry,
}

impl AppState {
    pub fn new(gate: LicenseGate, pipeline: TutorPipeline) -> Self {
        Self {
            gate: Arc::new(gate),
            pipeline,
            sessions: SessionRegistry::default(),
        }
    }

    /// The session registry.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionResponse {
    pub logged_in: bool,
    pub masked_key: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub key: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TutorBody {
    pub subject: String,
    pub task: String,
    pub image_base64: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, headers: HeaderMap, message: String) -> Response {
    (status, headers, Json(ErrorResponse { error: message })).into_response()
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn session_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut session = RequestSession::open(&state.sessions, &headers).await;
    session.binder.recall(&state.gate).await;
    let body = SessionResponse {
        logged_in: session.binder.state().granted_key().is_some(),
        masked_key: session.binder.masked_key(),
    };
    let cookies = session.close(&state.sessions).await;
    (cookies, Json(body)).into_response()
}

async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Response {
    let mut session = RequestSession::open(&state.sessions, &headers).await;
    let key = req.key.trim();
    let result = state.gate.login(key).await;

    let status = match &result {
        Ok(_) => {
            session.binder.remember(key);
            StatusCode::OK
        }
        Err(LicenseError::StoreUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        Err(_) => StatusCode::UNAUTHORIZED,
    };
    let verdict = Verdict::from(&result);
    info!(granted = verdict.granted, "Login attempt: {}", verdict.message);

    let cookies = session.close(&state.sessions).await;
    (status, cookies, Json(verdict)).into_response()
}

async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut session = RequestSession::open(&state.sessions, &headers).await;
    session.binder.forget();
    let cookies = session.close(&state.sessions).await;
    (cookies, Json(SessionResponse { logged_in: false, masked_key: None })).into_response()
}

async fn reset_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut session = RequestSession::open(&state.sessions, &headers).await;
    session.binder.force_reset();
    let cookies = session.close(&state.sessions).await;
    (cookies, Json(SessionResponse { logged_in: false, masked_key: None })).into_response()
}

async fn subjects_handler() -> Json<&'static [Subject]> {
    Json(SUBJECTS)
}

/// Accepts plain base64 or a `data:` URL.
fn decode_image(encoded: &str) -> Result<Vec<u8>, String> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    BASE64
        .decode(payload.trim())
        .map_err(|e| format!("image is not valid base64: {e}"))
}

fn tutor_status(err: &TutorError) -> StatusCode {
    match err {
        TutorError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        TutorError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        TutorError::Recognition(_) | TutorError::NoTextDetected | TutorError::Reasoning(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

async fn tutor_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TutorBody>,
) -> Response {
    let mut session = RequestSession::open(&state.sessions, &headers).await;
    let authorized = session.binder.authorize(&state.gate).await;
    let cookies = session.close(&state.sessions).await;

    if let Err(e) = authorized {
        return error_response(StatusCode::UNAUTHORIZED, cookies, e.user_message());
    }

    let image = match decode_image(&body.image_base64) {
        Ok(image) => image,
        Err(reason) => {
            let err = TutorError::InvalidRequest(reason);
            return error_response(StatusCode::BAD_REQUEST, cookies, err.user_message());
        }
    };

    let request = TutorRequest {
        subject: body.subject,
        task: body.task,
        image,
    };
    match state.pipeline.run(&request).await {
        Ok(lesson) => (cookies, Json::<Lesson>(lesson)).into_response(),
        Err(e) => {
            warn!(subject = %request.subject, "Tutoring request failed: {}", e);
            error_response(tutor_status(&e), cookies, e.user_message())
        }
    }
}

/// Build the HTTP API router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/session", get(session_handler))
        .route("/api/v1/login", post(login_handler))
        .route("/api/v1/logout", post(logout_handler))
        .route("/api/v1/reset", post(reset_handler))
        .route("/api/v1/subjects", get(subjects_handler))
        .route("/api/v1/tutor", post(tutor_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
