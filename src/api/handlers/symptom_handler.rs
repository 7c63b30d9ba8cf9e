use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::symptom_dto::*, extract::AppJson},
    error::AppError,
    security::validation::RequestValidator,
};

pub async fn analyze_symptoms(
    State(state): State<AppState>,
    AppJson(request): AppJson<AnalyzeSymptomsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let text = state
        .validator
        .validate_symptoms(request.symptoms.as_deref())?;
    let text = RequestValidator::sanitize_string(text);

    let result = state.symptom_checker.analyze(&text);
    state.metrics.record_symptom_check();
    debug!(
        "Symptom analysis: {} findings, score {}, risk {}",
        result.detected_symptoms.len(),
        result.risk_score,
        result.risk_level
    );

    Ok(Json(AnalyzeSymptomsResponse {
        success: true,
        result,
    }))
}
