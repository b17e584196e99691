//! Dashboard endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use core_kernel::{DueWindow, ListFilter, Repository};
use domain_directory::RateTable;
use domain_reporting::{DashboardData, DashboardStats, TargetCurrency};

use crate::dto::query::DashboardQuery;
use crate::error::{ApiError, PortResultExt};
use crate::AppState;

/// `GET /api/dashboard-stats[?currency=]`
///
/// Everything is loaded and aggregated per request. Rates are only read when
/// a target currency is asked for.
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardStats>, ApiError> {
    let target = match query.currency.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => Some(ApiError::currency("currency", code)?),
        _ => None,
    };

    let repositories = &state.repositories;
    let all = ListFilter::all();
    let (letters, credits, projects, banks) = tokio::try_join!(
        repositories.guarantee_letters.list(&all),
        repositories.credits.list(&all),
        repositories.projects.list(&all),
        repositories.banks.list(&all),
    )
    .failed_to("fetch dashboard stats")?;

    let rates = match target {
        Some(_) => RateTable::from_rates(
            &repositories
                .exchange_rates
                .list(&all)
                .await
                .failed_to("fetch dashboard stats")?,
        ),
        None => RateTable::new(),
    };

    let data = DashboardData {
        letters,
        credits,
        total_projects: projects.len(),
        total_banks: banks.len(),
    };
    let window = DueWindow::starting(Utc::now().date_naive());
    let stats = DashboardStats::compute(
        &data,
        window,
        target.as_ref().map(|code| TargetCurrency { code, rates: &rates }),
    );

    info!(
        letters = stats.total_letters,
        credits = stats.total_credits,
        "Dashboard stats served"
    );
    Ok(Json(stats))
}
