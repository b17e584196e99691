//! Query strings

use serde::Deserialize;

use core_kernel::{BankId, LetterId, ListFilter, ProjectId};

use crate::error::ApiError;
use crate::extract::query_id;

/// `?projectId=&bankId=&letterId=` on list endpoints; each entity ignores
/// the filters that do not apply to it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub project_id: Option<String>,
    pub bank_id: Option<String>,
    pub letter_id: Option<String>,
}

impl ListQuery {
    pub fn filter(&self) -> Result<ListFilter, ApiError> {
        Ok(ListFilter {
            project_id: query_id::<ProjectId>(self.project_id.as_deref(), "projectId")?,
            bank_id: query_id::<BankId>(self.bank_id.as_deref(), "bankId")?,
            letter_id: query_id::<LetterId>(self.letter_id.as_deref(), "letterId")?,
        })
    }
}

/// `?currency=` on the dashboard
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub currency: Option<String>,
}

/// `?amount=&from=&to=` on the converter
#[derive(Debug, Default, Deserialize)]
pub struct ConvertQuery {
    pub amount: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}
