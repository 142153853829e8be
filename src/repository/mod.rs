//! Persistence repositories

pub mod condominium;
pub mod machine;

pub use condominium::{CondominiumRepository, CondominiumRepositoryImpl};
pub use machine::{MachineRepository, MachineRepositoryImpl};

/// True when the error is a storage-level unique constraint violation
/// (SQLSTATE 23000, e.g. MySQL duplicate entry).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23000"))
}
