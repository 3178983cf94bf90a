//! Prediction endpoint - classify one uploaded image

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use foodcheck::inference::PredictionResponse;
use foodcheck::utils::error::FoodCheckError;

use crate::state::SharedState;

/// POST /predict - Classify one uploaded image.
///
/// Expects a multipart form with a `file` field holding the image bytes
/// (the first field is accepted when none is named `file`). Decode failures
/// are the client's fault and map to 400; everything else is a 500.
pub async fn predict(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<PredictionResponse>, (StatusCode, String)> {
    let bytes = read_upload(&mut multipart).await?;

    // The pipeline is CPU-bound; keep it off the async executor.
    let state = state.clone();
    let response = tokio::task::spawn_blocking(move || state.service.predict(&bytes))
        .await
        .map_err(|e| {
            error!("Inference task join error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "inference task failed".to_string(),
            )
        })?
        .map_err(error_response)?;

    Ok(Json(response))
}

/// Pull the uploaded file out of the multipart form.
async fn read_upload(multipart: &mut Multipart) -> Result<Bytes, (StatusCode, String)> {
    let mut fallback: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid multipart body: {}", e)))?
    {
        let is_file_field = field.name() == Some("file");
        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("failed to read upload: {}", e)))?;

        if is_file_field {
            return Ok(data);
        }
        if fallback.is_none() {
            fallback = Some(data);
        }
    }

    fallback.ok_or((StatusCode::BAD_REQUEST, "missing file upload".to_string()))
}

/// Map pipeline errors to HTTP status codes.
fn error_response(err: FoodCheckError) -> (StatusCode, String) {
    if err.is_client_error() {
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        error!("Prediction failed: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}
