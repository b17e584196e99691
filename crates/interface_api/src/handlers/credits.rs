//! Path-style credit filters

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::{BankId, ListFilter, ProjectId, Repository};
use domain_credit::CreditRecord;

use crate::error::{ApiError, PortResultExt};
use crate::extract::path_id;
use crate::AppState;

/// `GET /api/credits/project/:id`
pub async fn by_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CreditRecord>>, ApiError> {
    let project_id: ProjectId = path_id(&id, "Project")?;
    list(&state, ListFilter::by_project(project_id)).await
}

/// `GET /api/credits/bank/:id`
pub async fn by_bank(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CreditRecord>>, ApiError> {
    let bank_id: BankId = path_id(&id, "Bank")?;
    list(&state, ListFilter::by_bank(bank_id)).await
}

async fn list(state: &AppState, filter: ListFilter) -> Result<Json<Vec<CreditRecord>>, ApiError> {
    let credits = state
        .repositories
        .credits
        .list(&filter)
        .await
        .failed_to("fetch credits")?;
    Ok(Json(credits))
}
