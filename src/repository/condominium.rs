//! Condominium repository

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::{Condominium, NewCondominium};
use crate::error::{AppError, Result};
use crate::pagination::{PaginationRequest, StorePage};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CondominiumRepository: Send + Sync {
    async fn create(&self, input: &NewCondominium) -> Result<Condominium>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Condominium>>;
    async fn exists_by_id(&self, id: i64) -> Result<bool>;
    async fn find_all(&self, page: &PaginationRequest) -> Result<StorePage<Condominium>>;
}

pub struct CondominiumRepositoryImpl {
    pool: MySqlPool,
}

impl CondominiumRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Resolve a client sort field to a column. An unknown field is a store
/// failure, not a validation failure.
fn sort_column(field: &str) -> Result<&'static str> {
    match field {
        "id" => Ok("id"),
        "name" => Ok("name"),
        "address" => Ok("address"),
        "contactPhone" => Ok("contact_phone"),
        "email" => Ok("email"),
        other => Err(AppError::Internal(anyhow::anyhow!(
            "No sortable column matches '{other}' on condominiums"
        ))),
    }
}

#[async_trait]
impl CondominiumRepository for CondominiumRepositoryImpl {
    async fn create(&self, input: &NewCondominium) -> Result<Condominium> {
        let result = sqlx::query(
            r#"
            INSERT INTO condominiums (name, address, contact_phone, email)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.contact_phone)
        .bind(&input.email)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create condominium")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Condominium>> {
        let condominium = sqlx::query_as::<_, Condominium>(
            r#"
            SELECT id, name, address, contact_phone, email
            FROM condominiums
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(condominium)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM condominiums WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 > 0)
    }

    async fn find_all(&self, page: &PaginationRequest) -> Result<StorePage<Condominium>> {
        let column = sort_column(&page.sort_by)?;
        let query = format!(
            "SELECT id, name, address, contact_phone, email FROM condominiums \
             ORDER BY {} {} LIMIT ? OFFSET ?",
            column,
            page.direction.as_sql()
        );

        let condominiums = sqlx::query_as::<_, Condominium>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM condominiums")
            .fetch_one(&self.pool)
            .await?;

        Ok(StorePage::new(condominiums, page, row.0))
    }
}
