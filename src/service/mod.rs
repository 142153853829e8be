//! Business logic services

pub mod condominium;
pub mod machine;

pub use condominium::CondominiumService;
pub use machine::MachineService;
