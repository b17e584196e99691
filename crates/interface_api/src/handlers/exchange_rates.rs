//! Currency converter endpoint

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{ListFilter, Repository};
use domain_directory::{Conversion, RateTable};

use crate::dto::query::ConvertQuery;
use crate::error::{ApiError, FieldError, PortResultExt};
use crate::AppState;

/// `GET /api/exchange-rates/convert?amount=&from=&to=`
///
/// A pair with no stored rate in either direction converts to the unchanged
/// amount with source `unavailable`. A result too large for a decimal is a
/// 400 on `amount`.
pub async fn convert(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<Conversion>, ApiError> {
    let raw_amount = query.amount.ok_or_else(|| FieldError::required("amount"))?;
    let amount = Decimal::from_str(raw_amount.trim())
        .map_err(|_| ApiError::invalid("amount", format!("invalid amount {raw_amount:?}")))?;
    let from = ApiError::currency("from", query.from.as_deref().unwrap_or_default())?;
    let to = ApiError::currency("to", query.to.as_deref().unwrap_or_default())?;

    if from == to {
        let identity = RateTable::new()
            .conversion(amount, &from, &to)
            .map_err(FieldError::from)?;
        return Ok(Json(identity));
    }

    let rates = state
        .repositories
        .exchange_rates
        .list(&ListFilter::all())
        .await
        .failed_to("convert amount")?;
    let conversion = RateTable::from_rates(&rates)
        .conversion(amount, &from, &to)
        .map_err(FieldError::from)?;
    debug!(%from, %to, source = ?conversion.source, "Converted amount");
    Ok(Json(conversion))
}
