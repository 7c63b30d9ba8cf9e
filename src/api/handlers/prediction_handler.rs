use axum::{Json, extract::State, response::IntoResponse};
use serde_json::Value;
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::prediction_dto::*, extract::AppJson},
    error::AppError,
    models::feature::FeatureInput,
};

/// JSON 值转换为分类输入
fn parse_features(value: Value) -> Result<FeatureInput, AppError> {
    serde_json::from_value(value).map_err(|_| {
        AppError::InvalidInput(
            "Unsupported feature format: expected a name-to-number mapping, a list of mappings, or a numeric row"
                .to_string(),
        )
    })
}

pub async fn predict(
    State(state): State<AppState>,
    AppJson(request): AppJson<PredictRequest>,
) -> Result<impl IntoResponse, AppError> {
    let predictor = state.predictor()?;
    let features = request
        .features
        .ok_or_else(|| AppError::InvalidInput("No features provided".to_string()))?;
    let input = parse_features(features)?;

    let result = predictor.predict(&input)?;
    state.metrics.record_predictions(1);
    debug!(
        "Prediction: {} ({:.1}%), risk {}",
        result.prediction, result.confidence, result.risk_level
    );

    Ok(Json(PredictResponse {
        success: true,
        result,
    }))
}

pub async fn predict_batch(
    State(state): State<AppState>,
    AppJson(request): AppJson<BatchPredictRequest>,
) -> Result<impl IntoResponse, AppError> {
    let predictor = state.predictor()?;
    let samples = request
        .samples
        .ok_or_else(|| AppError::InvalidInput("No samples provided".to_string()))?;
    debug!("Batch prediction: {} samples", samples.len());

    let inputs = samples
        .into_iter()
        .map(parse_features)
        .collect::<Result<Vec<_>, _>>()?;
    let results = predictor.predict_batch(&inputs)?;
    state.metrics.record_predictions(results.len() as u64);

    Ok(Json(BatchPredictResponse {
        success: true,
        count: results.len(),
        results,
    }))
}
