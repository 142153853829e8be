//! Machine business logic
//!
//! Creation is a check-then-insert sequence: validate shape, resolve the
//! condominium, reject a scoped duplicate, insert. The duplicate lookup is
//! only a fast path; the storage unique key on
//! `(condominium_id, identifier)` is what makes the invariant hold under
//! concurrent creation, and the repository reports its violation as the same
//! conflict outcome.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    Condominium, Machine, MachineInput, MachineResponse, MACHINE_ID_PROVIDED_ON_CREATION,
    MACHINE_ID_REQUIRED_FOR_UPDATE,
};
use crate::error::{AppError, Result};
use crate::pagination::{PaginationRequest, StorePage};
use crate::repository::{CondominiumRepository, MachineRepository};

pub struct MachineService<MR: MachineRepository, CR: CondominiumRepository> {
    machine_repo: Arc<MR>,
    condominium_repo: Arc<CR>,
}

impl<MR: MachineRepository, CR: CondominiumRepository> MachineService<MR, CR> {
    pub fn new(machine_repo: Arc<MR>, condominium_repo: Arc<CR>) -> Self {
        Self {
            machine_repo,
            condominium_repo,
        }
    }

    pub async fn create(&self, input: MachineInput) -> Result<MachineResponse> {
        let machine = input.validated()?;

        if machine.id.is_some() {
            return Err(AppError::InvalidParameter(
                MACHINE_ID_PROVIDED_ON_CREATION.to_string(),
            ));
        }

        let condominium = self
            .condominium_repo
            .find_by_id(machine.condominium_id)
            .await?
            .ok_or(AppError::CondominiumNotFound)?;

        if self
            .machine_repo
            .find_by_condominium_and_identifier(machine.condominium_id, &machine.identifier)
            .await?
            .is_some()
        {
            return Err(AppError::MachineIdentifierInUse);
        }

        let created = self.machine_repo.create(&machine).await?;
        Ok(MachineResponse::from_parts(created, condominium))
    }

    pub async fn get(&self, id: i64) -> Result<MachineResponse> {
        let machine = self
            .machine_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::MachineNotFound)?;

        let condominium = self.owning_condominium(&machine).await?;
        Ok(MachineResponse::from_parts(machine, condominium))
    }

    pub async fn get_by_identifier(
        &self,
        condominium_id: i64,
        identifier: &str,
    ) -> Result<MachineResponse> {
        let condominium = self
            .condominium_repo
            .find_by_id(condominium_id)
            .await?
            .ok_or(AppError::CondominiumNotFound)?;

        let machine = self
            .machine_repo
            .find_by_condominium_and_identifier(condominium_id, identifier)
            .await?
            .ok_or(AppError::MachineNotFound)?;

        Ok(MachineResponse::from_parts(machine, condominium))
    }

    pub async fn update(&self, input: MachineInput) -> Result<MachineResponse> {
        let machine = input.validated()?;

        let id = machine.id.ok_or_else(|| {
            AppError::InvalidParameter(MACHINE_ID_REQUIRED_FOR_UPDATE.to_string())
        })?;

        if !self.machine_repo.exists_by_id(id).await? {
            return Err(AppError::MachineNotFound);
        }

        let condominium = self
            .condominium_repo
            .find_by_id(machine.condominium_id)
            .await?
            .ok_or(AppError::CondominiumNotFound)?;

        let updated = self.machine_repo.update(id, &machine).await?;
        Ok(MachineResponse::from_parts(updated, condominium))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.machine_repo.exists_by_id(id).await? {
            return Err(AppError::MachineNotFound);
        }
        self.machine_repo.delete(id).await
    }

    pub async fn list(&self, request: &PaginationRequest) -> Result<StorePage<MachineResponse>> {
        let page = self.machine_repo.find_all(request).await?;

        let StorePage {
            items,
            page_index,
            page_size,
            total_elements,
            total_pages,
        } = page;

        let mut condominiums: HashMap<i64, Condominium> = HashMap::new();
        let mut content = Vec::with_capacity(items.len());
        for machine in items {
            let condominium = match condominiums.get(&machine.condominium_id).cloned() {
                Some(condominium) => condominium,
                None => {
                    let condominium = self.owning_condominium(&machine).await?;
                    condominiums.insert(machine.condominium_id, condominium.clone());
                    condominium
                }
            };
            content.push(MachineResponse::from_parts(machine, condominium));
        }

        Ok(StorePage {
            items: content,
            page_index,
            page_size,
            total_elements,
            total_pages,
        })
    }

    /// A stored machine always references an existing condominium (FK);
    /// a dangling reference is a store inconsistency.
    async fn owning_condominium(&self, machine: &Machine) -> Result<Condominium> {
        self.condominium_repo
            .find_by_id(machine.condominium_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "Machine {} references missing condominium {}",
                    machine.id,
                    machine.condominium_id
                ))
            })
    }
}
