//! Domain models and input validation

pub mod condominium;
pub mod machine;

pub use condominium::{Condominium, CondominiumInput, NewCondominium};
pub use machine::{Machine, MachineInput, MachineResponse, NewMachine};

// Validation messages. First-error-wins: inputs report exactly one of these
// per failing request, in field declaration order.
pub const MACHINE_IDENTIFIER_NOT_EMPTY_NULL: &str = "Machine identifier must not be empty or null";
pub const MACHINE_CONDOMINIUM_ID_NOT_EMPTY_NULL: &str =
    "Machine condominium ID must not be empty or null";
pub const MACHINE_TYPE_NOT_EMPTY_NULL: &str = "Machine type must not be empty or null";
pub const MACHINE_ID_PROVIDED_ON_CREATION: &str = "Machine ID should NOT be provided for creation";
pub const MACHINE_ID_REQUIRED_FOR_UPDATE: &str = "Machine ID should be provided for update";

pub const CONDOMINIUM_NAME_NOT_EMPTY_NULL: &str = "Condominium name must not be empty or null";
pub const CONDOMINIUM_ADDRESS_NOT_EMPTY_NULL: &str =
    "Condominium Address must not be empty or null";
pub const CONDOMINIUM_CONTACT_NOT_EMPTY_NULL: &str =
    "Condominium contact phone must not be empty or null";
pub const CONDOMINIUM_EMAIL_NOT_EMPTY_NULL: &str = "Condominium email must not be empty or null";
pub const CONDOMINIUM_EMAIL_FORMAT_NOT_VALID: &str = "Condominium email format is not valid";
pub const CONDOMINIUM_ID_PROVIDED_ON_CREATION: &str =
    "Condominium ID should NOT be provided for creation";
