use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::IntoResponse,
};
use tracing::{debug, info, warn};

use crate::{
    api::{app_state::AppState, dto::upload_dto::*},
    error::AppError,
    models::feature::FeatureInput,
    security::validation::ValidationError,
};

const FILE_FIELD: &str = "file";

/// 处理上传文件；模型已加载时附带分类结果
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart?;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = state
            .validator
            .validate_file_name(field.file_name())?
            .to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e)))?;
        upload = Some((file_name, content));
        break;
    }

    let (file_name, content) = upload.ok_or(ValidationError::MissingFile)?;
    debug!("Upload received: {} ({} bytes)", file_name, content.len());

    let mut processed = state
        .file_processor
        .process_upload(&file_name, &content)
        .await?;
    state.metrics.record_upload();
    info!("Processed upload '{}': {}", file_name, processed.message);

    if let Some(predictor) = &state.predictor {
        match predictor.predict(&FeatureInput::Named(processed.features.clone())) {
            Ok(prediction) => {
                state.metrics.record_predictions(1);
                processed = processed.with_prediction(prediction);
            }
            Err(e) => warn!("Prediction for upload '{}' failed: {}", file_name, e),
        }
    }

    Ok(Json(UploadResponse {
        success: true,
        result: processed,
    }))
}
