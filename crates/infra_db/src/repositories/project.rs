//! Project repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{ListFilter, PortError, ProjectId, Repository};
use domain_directory::{NewProject, Project, ProjectPatch};

use crate::error::DatabaseError;
use crate::repositories::push_set_opt;

const COLUMNS: &str = "id, name, description, status, created_at, updated_at";

/// PostgreSQL storage for projects
#[derive(Debug, Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: ProjectId) -> Result<ProjectRow, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Project", id))
    }
}

/// Database row for a project
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: ProjectId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl Repository<Project> for PgProjectRepository {
    #[instrument(skip(self))]
    async fn list(&self, _filter: &ListFilter) -> Result<Vec<Project>, PortError> {
        debug!("Listing projects");
        let sql = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    #[instrument(skip(self), fields(project_id = %id))]
    async fn get(&self, id: ProjectId) -> Result<Project, PortError> {
        debug!("Fetching project");
        Ok(self.fetch(id).await?.into())
    }

    #[instrument(skip(self, new), fields(name = %new.name))]
    async fn create(&self, new: NewProject) -> Result<Project, PortError> {
        let id = ProjectId::new();
        let now = Utc::now();
        debug!(project_id = %id, "Creating project");

        let sql = format!(
            "INSERT INTO projects ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $5) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(Uuid::from(id))
            .bind(new.name)
            .bind(new.description)
            .bind(new.status)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(row.into())
    }

    #[instrument(skip(self, patch), fields(project_id = %id))]
    async fn update(&self, id: ProjectId, patch: ProjectPatch) -> Result<Project, PortError> {
        debug!("Updating project");
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE projects SET updated_at = ");
        qb.push_bind(Utc::now());
        push_set_opt(&mut qb, "name", patch.name);
        push_set_opt(&mut qb, "description", patch.description);
        push_set_opt(&mut qb, "status", patch.status);
        qb.push(" WHERE id = ").push_bind(Uuid::from(id));
        qb.push(" RETURNING ").push(COLUMNS);

        let row = qb
            .build_query_as::<ProjectRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?
            .ok_or_else(|| DatabaseError::not_found("Project", id))?;
        Ok(row.into())
    }

    #[instrument(skip(self), fields(project_id = %id))]
    async fn delete(&self, id: ProjectId) -> Result<(), PortError> {
        debug!("Deleting project");
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Project", id).into());
        }
        Ok(())
    }
}
