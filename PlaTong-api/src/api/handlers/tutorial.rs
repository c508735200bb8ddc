use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::entities::common::ErrorResponse;
use crate::entities::tutorial::{AudioEventRequest, CommandRequest, SessionResponse};
use crate::sessions::SessionError;
use crate::state::AppState;

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            SessionError::NotFound(id) => {
                debug!(session_id = %id, "Unknown tutorial session");
                ErrorResponse::not_found("tutorial session").into_response()
            }
            SessionError::CapacityExceeded(limit) => {
                warn!(limit, "Tutorial session limit reached");
                ErrorResponse::capacity_exceeded(limit).into_response()
            }
            e => {
                error!("Tutorial session error: {}", e);
                ErrorResponse::internal_error().into_response()
            }
        }
    }
}

/// Open a guide session on the intro screen
#[utoipa::path(
    post,
    path = "/api/v1/tutorial/sessions",
    responses(
        (status = 201, description = "Session created", body = SessionResponse),
        (status = 503, description = "Too many open sessions", body = ErrorResponse),
    ),
    tag = "tutorial"
)]
#[instrument(skip(state))]
pub async fn create_session(State(state): State<AppState>) -> Result<impl IntoResponse, SessionError> {
    let (id, player) = state.sessions.create()?;
    let session = player.snapshot()?;
    info!(session_id = %id, "Guide session opened");
    Ok((StatusCode::CREATED, Json(SessionResponse { id, session })))
}

/// Current state of a guide session
#[utoipa::path(
    get,
    path = "/api/v1/tutorial/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Guide session ID")
    ),
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    ),
    tag = "tutorial"
)]
#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, SessionError> {
    let session = state.sessions.get(id)?.snapshot()?;
    Ok(Json(SessionResponse { id, session }))
}

/// Apply a user command to a guide session
///
/// Commands that do not apply in the current phase leave the session unchanged.
#[utoipa::path(
    post,
    path = "/api/v1/tutorial/sessions/{id}/commands",
    params(
        ("id" = Uuid, Path, description = "Guide session ID")
    ),
    request_body = CommandRequest,
    responses(
        (status = 200, description = "Session state after the command", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    ),
    tag = "tutorial"
)]
#[instrument(skip(state))]
pub async fn apply_command(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<SessionResponse>, SessionError> {
    let player = state.sessions.get(id)?;
    let session = player.apply(request.command).await?;
    Ok(Json(SessionResponse { id, session }))
}

/// Report a playback change from the client's audio element
#[utoipa::path(
    post,
    path = "/api/v1/tutorial/sessions/{id}/audio-events",
    params(
        ("id" = Uuid, Path, description = "Guide session ID")
    ),
    request_body = AudioEventRequest,
    responses(
        (status = 200, description = "Session state after the event", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    ),
    tag = "tutorial"
)]
#[instrument(skip(state))]
pub async fn report_audio_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AudioEventRequest>,
) -> Result<Json<SessionResponse>, SessionError> {
    let session = state.sessions.get(id)?.audio_event(request.event)?;
    Ok(Json(SessionResponse { id, session }))
}

/// Close a guide session and cancel its timers
#[utoipa::path(
    delete,
    path = "/api/v1/tutorial/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Guide session ID")
    ),
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Session not found", body = ErrorResponse),
    ),
    tag = "tutorial"
)]
#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, SessionError> {
    state.sessions.remove(id)?;
    info!(session_id = %id, "Guide session closed");
    Ok(StatusCode::NO_CONTENT)
}
