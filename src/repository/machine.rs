//! Machine repository
//!
//! The machines table carries a composite unique key on
//! `(condominium_id, identifier)`; that constraint, not the service-level
//! lookup, is the authoritative guard against concurrent duplicate creation.
//! Violations surface here as the conflict outcome.

use async_trait::async_trait;
use sqlx::MySqlPool;

use super::is_unique_violation;
use crate::domain::{Machine, NewMachine};
use crate::error::{AppError, Result};
use crate::pagination::{PaginationRequest, StorePage};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MachineRepository: Send + Sync {
    async fn create(&self, input: &NewMachine) -> Result<Machine>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Machine>>;
    async fn exists_by_id(&self, id: i64) -> Result<bool>;
    async fn find_by_condominium_and_identifier(
        &self,
        condominium_id: i64,
        identifier: &str,
    ) -> Result<Option<Machine>>;
    async fn update(&self, id: i64, input: &NewMachine) -> Result<Machine>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn find_all(&self, page: &PaginationRequest) -> Result<StorePage<Machine>>;
}

pub struct MachineRepositoryImpl {
    pool: MySqlPool,
}

impl MachineRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Resolve a client sort field to a column. An unknown field is a store
/// failure, not a validation failure.
fn sort_column(field: &str) -> Result<&'static str> {
    match field {
        "id" => Ok("id"),
        "identifier" => Ok("identifier"),
        "type" => Ok("`type`"),
        "condominiumId" => Ok("condominium_id"),
        other => Err(AppError::Internal(anyhow::anyhow!(
            "No sortable column matches '{other}' on machines"
        ))),
    }
}

fn map_write_error(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        AppError::MachineIdentifierInUse
    } else {
        AppError::Database(err)
    }
}

#[async_trait]
impl MachineRepository for MachineRepositoryImpl {
    async fn create(&self, input: &NewMachine) -> Result<Machine> {
        let result = sqlx::query(
            r#"
            INSERT INTO machines (identifier, `type`, condominium_id)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&input.identifier)
        .bind(&input.machine_type)
        .bind(input.condominium_id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create machine")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Machine>> {
        let machine = sqlx::query_as::<_, Machine>(
            r#"
            SELECT id, identifier, `type`, condominium_id
            FROM machines
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(machine)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM machines WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 > 0)
    }

    async fn find_by_condominium_and_identifier(
        &self,
        condominium_id: i64,
        identifier: &str,
    ) -> Result<Option<Machine>> {
        let machine = sqlx::query_as::<_, Machine>(
            r#"
            SELECT id, identifier, `type`, condominium_id
            FROM machines
            WHERE condominium_id = ? AND identifier = ?
            "#,
        )
        .bind(condominium_id)
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(machine)
    }

    async fn update(&self, id: i64, input: &NewMachine) -> Result<Machine> {
        sqlx::query(
            r#"
            UPDATE machines
            SET identifier = ?, `type` = ?, condominium_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.identifier)
        .bind(&input.machine_type)
        .bind(input.condominium_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update machine")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM machines WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::MachineNotFound);
        }

        Ok(())
    }

    async fn find_all(&self, page: &PaginationRequest) -> Result<StorePage<Machine>> {
        let column = sort_column(&page.sort_by)?;
        let query = format!(
            "SELECT id, identifier, `type`, condominium_id FROM machines \
             ORDER BY {} {} LIMIT ? OFFSET ?",
            column,
            page.direction.as_sql()
        );

        let machines = sqlx::query_as::<_, Machine>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM machines")
            .fetch_one(&self.pool)
            .await?;

        Ok(StorePage::new(machines, page, row.0))
    }
}
