//! Projects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Entity, ProjectId};

use crate::error::DirectoryError;
use crate::{required_text, DEFAULT_STATUS};

/// A construction or business project that letters and credits are drawn against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    /// Free-form status, `active` unless set otherwise
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated create payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

impl NewProject {
    /// Creates a project payload with the default status and no description
    pub fn new(name: impl Into<String>) -> Result<Self, DirectoryError> {
        Ok(Self {
            name: required_text(name, "name")?,
            description: None,
            status: DEFAULT_STATUS.to_string(),
        })
    }

    /// Sets the description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Overrides the default status; `None` keeps the default
    pub fn with_status(mut self, status: Option<String>) -> Result<Self, DirectoryError> {
        if let Some(status) = status {
            self.status = required_text(status, "status")?;
        }
        Ok(self)
    }
}

/// Fields to change on an existing project
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<String>,
}

impl ProjectPatch {
    /// Returns true when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

impl Entity for Project {
    const NAME: &'static str = "Project";

    type Id = ProjectId;
    type Record = Project;
    type New = NewProject;
    type Patch = ProjectPatch;
}
