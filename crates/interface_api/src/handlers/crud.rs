//! Generic CRUD handlers
//!
//! Each stored entity implements [`Resource`], which names its repository
//! and its request bodies. The five handlers below are then mounted once per
//! entity by the router.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use core_kernel::{Entity, Repository};
use domain_credit::Credit;
use domain_directory::{Bank, Currency, ExchangeRate, Project};
use domain_guarantee::{GuaranteeLetter, LetterPayment};
use infra_db::Repositories;

use crate::dto::credit::{CreateCreditRequest, UpdateCreditRequest};
use crate::dto::directory::{
    CreateBankRequest, CreateCurrencyRequest, CreateExchangeRateRequest, CreateProjectRequest,
    UpdateBankRequest, UpdateCurrencyRequest, UpdateExchangeRateRequest, UpdateProjectRequest,
};
use crate::dto::guarantee::{
    CreateLetterRequest, CreatePaymentRequest, UpdateLetterRequest, UpdatePaymentRequest,
};
use crate::dto::query::ListQuery;
use crate::error::{ApiError, PortResultExt};
use crate::extract::{path_id, ValidatedJson};
use crate::AppState;

/// An entity exposed through the generic CRUD endpoints
pub trait Resource: Entity + Sized {
    /// Singular noun used in failure messages
    const LABEL: &'static str;
    /// Plural noun used in failure messages
    const PLURAL: &'static str;
    /// Status of a successful create
    const CREATED: StatusCode = StatusCode::CREATED;

    type Create: DeserializeOwned + Validate + TryInto<Self::New, Error = ApiError> + Send + 'static;
    type Update: DeserializeOwned
        + Validate
        + TryInto<Self::Patch, Error = ApiError>
        + Send
        + 'static;

    fn repository(repositories: &Repositories) -> &dyn Repository<Self>;
}

impl Resource for Project {
    const LABEL: &'static str = "project";
    const PLURAL: &'static str = "projects";

    type Create = CreateProjectRequest;
    type Update = UpdateProjectRequest;

    fn repository(repositories: &Repositories) -> &dyn Repository<Self> {
        &repositories.projects
    }
}

impl Resource for Bank {
    const LABEL: &'static str = "bank";
    const PLURAL: &'static str = "banks";

    type Create = CreateBankRequest;
    type Update = UpdateBankRequest;

    fn repository(repositories: &Repositories) -> &dyn Repository<Self> {
        &repositories.banks
    }
}

impl Resource for Currency {
    const LABEL: &'static str = "currency";
    const PLURAL: &'static str = "currencies";

    type Create = CreateCurrencyRequest;
    type Update = UpdateCurrencyRequest;

    fn repository(repositories: &Repositories) -> &dyn Repository<Self> {
        &repositories.currencies
    }
}

impl Resource for ExchangeRate {
    const LABEL: &'static str = "exchange rate";
    const PLURAL: &'static str = "exchange rates";
    // create is an upsert, so it answers 200 either way
    const CREATED: StatusCode = StatusCode::OK;

    type Create = CreateExchangeRateRequest;
    type Update = UpdateExchangeRateRequest;

    fn repository(repositories: &Repositories) -> &dyn Repository<Self> {
        &repositories.exchange_rates
    }
}

impl Resource for GuaranteeLetter {
    const LABEL: &'static str = "guarantee letter";
    const PLURAL: &'static str = "guarantee letters";

    type Create = CreateLetterRequest;
    type Update = UpdateLetterRequest;

    fn repository(repositories: &Repositories) -> &dyn Repository<Self> {
        &repositories.guarantee_letters
    }
}

impl Resource for Credit {
    const LABEL: &'static str = "credit";
    const PLURAL: &'static str = "credits";

    type Create = CreateCreditRequest;
    type Update = UpdateCreditRequest;

    fn repository(repositories: &Repositories) -> &dyn Repository<Self> {
        &repositories.credits
    }
}

impl Resource for LetterPayment {
    const LABEL: &'static str = "letter payment";
    const PLURAL: &'static str = "letter payments";

    type Create = CreatePaymentRequest;
    type Update = UpdatePaymentRequest;

    fn repository(repositories: &Repositories) -> &dyn Repository<Self> {
        &repositories.letter_payments
    }
}

/// `GET /api/{resource}`
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<R::Record>>, ApiError> {
    let filter = query.filter()?;
    let records = R::repository(&state.repositories)
        .list(&filter)
        .await
        .failed_to(&format!("fetch {}", R::PLURAL))?;
    Ok(Json(records))
}

/// `GET /api/{resource}/:id`
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R::Record>, ApiError> {
    let id: R::Id = path_id(&id, R::NAME)?;
    let record = R::repository(&state.repositories)
        .get(id)
        .await
        .failed_to(&format!("fetch {}", R::LABEL))?;
    Ok(Json(record))
}

/// `POST /api/{resource}`
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<R::Create>,
) -> Result<(StatusCode, Json<R::Record>), ApiError> {
    let new: R::New = body.try_into()?;
    let record = R::repository(&state.repositories)
        .create(new)
        .await
        .failed_to(&format!("create {}", R::LABEL))?;
    Ok((R::CREATED, Json(record)))
}

/// `PATCH /api/{resource}/:id`
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<R::Update>,
) -> Result<Json<R::Record>, ApiError> {
    let id: R::Id = path_id(&id, R::NAME)?;
    let patch: R::Patch = body.try_into()?;
    let record = R::repository(&state.repositories)
        .update(id, patch)
        .await
        .failed_to(&format!("update {}", R::LABEL))?;
    Ok(Json(record))
}

/// `DELETE /api/{resource}/:id`
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: R::Id = path_id(&id, R::NAME)?;
    R::repository(&state.repositories)
        .delete(id)
        .await
        .failed_to(&format!("delete {}", R::LABEL))?;
    Ok(StatusCode::NO_CONTENT)
}
