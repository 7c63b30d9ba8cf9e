use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::doctor_dto::*, extract::AppQuery},
    error::AppError,
    models::{classification::RiskLevel, provider::ProviderQuery},
};

pub async fn list_doctors(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DoctorQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = state
        .validator
        .validate_top_n(params.top_n.unwrap_or(DEFAULT_TOP_N))?;

    let query = ProviderQuery {
        location: params.location.clone(),
        specialization: params.specialization.clone(),
        emergency: params.emergency(),
        risk_level: params.risk_level.as_deref().and_then(RiskLevel::parse),
        limit,
    };
    debug!("Doctor recommendation query: {:?}", query);

    let doctors = state.providers.recommend(&query);
    Ok(Json(DoctorsResponse::new(doctors)))
}

pub async fn emergency_doctors(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Listing emergency contacts");
    Json(DoctorsResponse::new(state.providers.emergency_contacts()))
}

pub async fn search_doctors(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DoctorSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let name = params
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::InvalidInput("No name provided".to_string()))?;
    debug!("Searching doctors by name: {}", name);

    Ok(Json(DoctorsResponse::new(state.providers.search_by_name(name))))
}

pub async fn list_locations(State(state): State<AppState>) -> impl IntoResponse {
    Json(LocationsResponse {
        success: true,
        locations: state.providers.locations(),
    })
}

pub async fn list_specializations(State(state): State<AppState>) -> impl IntoResponse {
    Json(SpecializationsResponse {
        success: true,
        specializations: state.providers.specializations(),
    })
}
