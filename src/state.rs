//! Shared application state traits
//!
//! Handlers are generic over this trait so the router can be built with the
//! production state or a test state backed by other repository
//! implementations.

use std::future::Future;

use crate::repository::{CondominiumRepository, MachineRepository};
use crate::service::{CondominiumService, MachineService};

pub trait HasServices: Clone + Send + Sync + 'static {
    type MachineRepo: MachineRepository + 'static;
    type CondominiumRepo: CondominiumRepository + 'static;

    fn machine_service(&self) -> &MachineService<Self::MachineRepo, Self::CondominiumRepo>;

    fn condominium_service(&self) -> &CondominiumService<Self::CondominiumRepo>;

    /// Whether the backing store is reachable
    fn check_ready(&self) -> impl Future<Output = bool> + Send;
}
