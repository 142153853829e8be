//! Condominium business logic

use std::sync::Arc;

use crate::domain::{Condominium, CondominiumInput, CONDOMINIUM_ID_PROVIDED_ON_CREATION};
use crate::error::{AppError, Result};
use crate::pagination::{PaginationRequest, StorePage};
use crate::repository::CondominiumRepository;

pub struct CondominiumService<R: CondominiumRepository> {
    repo: Arc<R>,
}

impl<R: CondominiumRepository> CondominiumService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CondominiumInput) -> Result<Condominium> {
        let condominium = input.validated()?;

        if condominium.id.is_some() {
            return Err(AppError::InvalidParameter(
                CONDOMINIUM_ID_PROVIDED_ON_CREATION.to_string(),
            ));
        }

        self.repo.create(&condominium).await
    }

    pub async fn get(&self, id: i64) -> Result<Condominium> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::CondominiumNotFound)
    }

    pub async fn list(&self, request: &PaginationRequest) -> Result<StorePage<Condominium>> {
        self.repo.find_all(request).await
    }
}
