// src/db/brand_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::brand::{Brand, BrandMemberView, BrandMembership, BrandWithRole},
};

#[derive(Clone)]
pub struct BrandRepository {
    pool: PgPool,
}

impl BrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_brand<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
    ) -> Result<Brand, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Brand>(
            r#"
            INSERT INTO brands (name, slug)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::InvalidInput(format!("O slug '{}' já está em uso.", slug));
                }
            }
            e.into()
        })
    }

    // Atribui um usuário a uma marca (na tabela-ponte).
    pub async fn add_member<'e, E>(
        &self,
        executor: E,
        brand_id: Uuid,
        user_id: Uuid,
        role: &str,
    ) -> Result<BrandMembership, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membership = sqlx::query_as::<_, BrandMembership>(
            r#"
            INSERT INTO brand_users (brand_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(brand_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(executor)
        .await?;

        Ok(membership)
    }

    /// A verificação de autorização mais importante do sistema: o chamador
    /// pertence a esta marca?
    pub async fn find_membership(
        &self,
        brand_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<BrandMembership>, AppError> {
        let membership = sqlx::query_as::<_, BrandMembership>(
            "SELECT * FROM brand_users WHERE brand_id = $1 AND user_id = $2",
        )
        .bind(brand_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    pub async fn find_membership_by_id<'e, E>(
        &self,
        executor: E,
        membership_id: Uuid,
    ) -> Result<Option<BrandMembership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membership =
            sqlx::query_as::<_, BrandMembership>("SELECT * FROM brand_users WHERE id = $1")
                .bind(membership_id)
                .fetch_optional(executor)
                .await?;

        Ok(membership)
    }

    /// Tranca as linhas de owner da marca dentro da transação corrente e
    /// devolve quantas são. A contagem e o UPDATE subsequente enxergam o
    /// mesmo estado; duas trocas de papel concorrentes se serializam aqui.
    pub async fn lock_and_count_owners<'e, E>(
        &self,
        executor: E,
        brand_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM brand_users WHERE brand_id = $1 AND role = 'owner' FOR UPDATE",
        )
        .bind(brand_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.len() as i64)
    }

    pub async fn update_member_role<'e, E>(
        &self,
        executor: E,
        membership_id: Uuid,
        new_role: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE brand_users SET role = $2 WHERE id = $1")
            .bind(membership_id)
            .bind(new_role)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn remove_member<'e, E>(
        &self,
        executor: E,
        membership_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM brand_users WHERE id = $1")
            .bind(membership_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn list_members(&self, brand_id: Uuid) -> Result<Vec<BrandMemberView>, AppError> {
        let members = sqlx::query_as::<_, BrandMemberView>(
            r#"
            SELECT bu.id, bu.user_id, u.email, u.display_name, bu.role, bu.created_at
              FROM brand_users bu
              JOIN users u ON u.id = bu.user_id
             WHERE bu.brand_id = $1
             ORDER BY bu.created_at
            "#,
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn list_brands_for_user(&self, user_id: Uuid) -> Result<Vec<BrandWithRole>, AppError> {
        let brands = sqlx::query_as::<_, BrandWithRole>(
            r#"
            SELECT b.id, b.name, b.slug, bu.role, b.created_at
              FROM brands b
              JOIN brand_users bu ON bu.brand_id = b.id
             WHERE bu.user_id = $1
             ORDER BY b.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }
}
