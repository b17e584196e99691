//! Payment lookups and commission summaries

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::{LetterId, ListFilter, Repository};
use domain_guarantee::{LetterPayment, PaymentSummary};

use crate::error::{ApiError, PortResultExt};
use crate::extract::path_id;
use crate::AppState;

/// `GET /api/letter-payments/letter/:id`
pub async fn for_letter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LetterPayment>>, ApiError> {
    let letter_id: LetterId = path_id(&id, "GuaranteeLetter")?;
    let payments = state
        .repositories
        .letter_payments
        .list(&ListFilter::by_letter(letter_id))
        .await
        .failed_to("fetch letter payments")?;
    Ok(Json(payments))
}

/// `GET /api/letter-payments/:id/summary` where `:id` is the letter
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentSummary>, ApiError> {
    let letter_id: LetterId = path_id(&id, "GuaranteeLetter")?;
    let letter = state
        .repositories
        .guarantee_letters
        .get(letter_id)
        .await
        .failed_to("fetch payment summary")?;
    let payments = state
        .repositories
        .letter_payments
        .list(&ListFilter::by_letter(letter_id))
        .await
        .failed_to("fetch payment summary")?;
    Ok(Json(PaymentSummary::compute(&letter, &payments)))
}

/// `GET /api/letter-payments/summaries`: one summary per letter, newest
/// letter first
pub async fn summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentSummary>>, ApiError> {
    let repositories = &state.repositories;
    let all = ListFilter::all();
    let (letters, payments) = tokio::try_join!(
        repositories.guarantee_letters.list(&all),
        repositories.letter_payments.list(&all),
    )
    .failed_to("fetch payment summaries")?;

    let summaries = PaymentSummary::for_letters(letters.iter().map(|l| &l.record), &payments);
    Ok(Json(summaries))
}
