use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};

use pla_tong_domain::entities::Classification;
use pla_tong_domain::services::ClassifyError;

use crate::entities::blood_pressure::InterpretRequest;
use crate::entities::common::ErrorResponse;
use crate::state::AppState;

/// Interpret a blood pressure reading
#[utoipa::path(
    post,
    path = "/api/v1/bloodpressure/interpret",
    request_body = InterpretRequest,
    responses(
        (status = 200, description = "Reading classified", body = Classification),
        (status = 400, description = "Values are not positive numbers", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(state))]
pub async fn interpret_blood_pressure(
    State(state): State<AppState>,
    Json(request): Json<InterpretRequest>,
) -> Result<impl IntoResponse, Response> {
    match state.classifier.classify(&request.systolic, &request.diastolic) {
        Ok(classification) => {
            if classification.emergency {
                warn!(
                    systolic = classification.reading.systolic,
                    diastolic = classification.reading.diastolic,
                    "Hypertensive crisis reading interpreted"
                );
            } else {
                info!(level = %classification.level(), "Reading interpreted");
            }
            Ok((StatusCode::OK, Json(classification)))
        }
        Err(e @ ClassifyError::InvalidReading) => {
            Err(ErrorResponse::validation_error(&e.to_string(), None).into_response())
        }
        Err(e) => {
            error!("Error classifying blood pressure reading: {}", e);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}
