// src/db/project_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::project::{Project, ProjectShare, SharedProjectView},
};

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        brand_id: Uuid,
        user_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (brand_id, user_id, name, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(brand_id)
        .bind(user_id)
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await?;

        Ok(project)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    pub async fn list_for_owner(
        &self,
        brand_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
             WHERE brand_id = $1 AND user_id = $2
             ORDER BY created_at DESC
            "#,
        )
        .bind(brand_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn upsert_share<'e, E>(
        &self,
        executor: E,
        project_id: Uuid,
        shared_with: Uuid,
        permission: &str,
    ) -> Result<ProjectShare, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let share = sqlx::query_as::<_, ProjectShare>(
            r#"
            INSERT INTO project_shares (project_id, shared_with, permission)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, shared_with)
            DO UPDATE SET
                permission = EXCLUDED.permission,
                status = 'pending',
                responded_at = NULL
            RETURNING *
            "#,
        )
        .bind(project_id)
        .bind(shared_with)
        .bind(permission)
        .fetch_one(executor)
        .await?;

        Ok(share)
    }

    pub async fn find_share_by_id(&self, share_id: Uuid) -> Result<Option<ProjectShare>, AppError> {
        let share = sqlx::query_as::<_, ProjectShare>("SELECT * FROM project_shares WHERE id = $1")
            .bind(share_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(share)
    }

    pub async fn update_share_status<'e, E>(
        &self,
        executor: E,
        share_id: Uuid,
        status: &str,
    ) -> Result<ProjectShare, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let share = sqlx::query_as::<_, ProjectShare>(
            r#"
            UPDATE project_shares
               SET status = $2, responded_at = now()
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(share_id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(share)
    }

    pub async fn list_shared_with(&self, user_id: Uuid) -> Result<Vec<SharedProjectView>, AppError> {
        let shared = sqlx::query_as::<_, SharedProjectView>(
            r#"
            SELECT p.id, p.name, u.display_name AS owner_name,
                   ps.permission, ps.created_at AS shared_at
              FROM project_shares ps
              JOIN projects p ON p.id = ps.project_id
              JOIN users u ON u.id = p.user_id
             WHERE ps.shared_with = $1 AND ps.status = 'accepted'
             ORDER BY ps.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(shared)
    }
}
