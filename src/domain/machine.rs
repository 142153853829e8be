//! Machine domain model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::condominium::require_text;
use super::{
    Condominium, MACHINE_CONDOMINIUM_ID_NOT_EMPTY_NULL, MACHINE_IDENTIFIER_NOT_EMPTY_NULL,
    MACHINE_TYPE_NOT_EMPTY_NULL,
};
use crate::error::{AppError, Result};

/// Machine entity. `identifier` is unique within its condominium; two
/// machines in different condominiums may share an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: i64,
    pub identifier: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub machine_type: String,
    pub condominium_id: i64,
}

/// Raw machine request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub condominium_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub machine_type: Option<String>,
}

/// Shape-validated machine input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMachine {
    pub id: Option<i64>,
    pub identifier: String,
    pub condominium_id: i64,
    pub machine_type: String,
}

impl MachineInput {
    /// Validate field presence in declaration order; the first failing rule
    /// wins. Whether `id` may be present depends on the operation and is
    /// checked by the workflow, not here.
    pub fn validated(&self) -> Result<NewMachine> {
        let identifier = require_text(&self.identifier, MACHINE_IDENTIFIER_NOT_EMPTY_NULL)?;
        let condominium_id = self.condominium_id.ok_or_else(|| {
            AppError::Validation(MACHINE_CONDOMINIUM_ID_NOT_EMPTY_NULL.to_string())
        })?;
        let machine_type = require_text(&self.machine_type, MACHINE_TYPE_NOT_EMPTY_NULL)?;

        Ok(NewMachine {
            id: self.id,
            identifier,
            condominium_id,
            machine_type,
        })
    }
}

/// Machine response payload with its condominium embedded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineResponse {
    pub id: i64,
    pub identifier: String,
    pub condominium: Condominium,
    #[serde(rename = "type")]
    pub machine_type: String,
}

impl MachineResponse {
    pub fn from_parts(machine: Machine, condominium: Condominium) -> Self {
        Self {
            id: machine.id,
            identifier: machine.identifier,
            condominium,
            machine_type: machine.machine_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> MachineInput {
        MachineInput {
            id: None,
            identifier: Some("W1".to_string()),
            condominium_id: Some(55),
            machine_type: Some("Washer".to_string()),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let validated = valid_input().validated().unwrap();
        assert_eq!(validated.identifier, "W1");
        assert_eq!(validated.condominium_id, 55);
        assert_eq!(validated.machine_type, "Washer");
    }

    #[test]
    fn test_missing_identifier_reported_first() {
        let input = MachineInput {
            identifier: None,
            condominium_id: None,
            machine_type: None,
            ..valid_input()
        };
        match input.validated() {
            Err(AppError::Validation(message)) => {
                assert_eq!(message, MACHINE_IDENTIFIER_NOT_EMPTY_NULL);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_condominium_id_rejected() {
        let input = MachineInput {
            condominium_id: None,
            ..valid_input()
        };
        match input.validated() {
            Err(AppError::Validation(message)) => {
                assert_eq!(message, MACHINE_CONDOMINIUM_ID_NOT_EMPTY_NULL);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_type_rejected() {
        let input = MachineInput {
            machine_type: Some("  ".to_string()),
            ..valid_input()
        };
        match input.validated() {
            Err(AppError::Validation(message)) => {
                assert_eq!(message, MACHINE_TYPE_NOT_EMPTY_NULL);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_machine_type_serializes_as_type() {
        let machine = Machine {
            id: 1,
            identifier: "W1".to_string(),
            machine_type: "Washer".to_string(),
            condominium_id: 55,
        };
        let json = serde_json::to_value(&machine).unwrap();
        assert_eq!(json["type"], "Washer");
        assert_eq!(json["condominiumId"], 55);
    }

    #[test]
    fn test_input_accepts_camel_case_body() {
        let input: MachineInput = serde_json::from_value(serde_json::json!({
            "identifier": "W1",
            "condominiumId": 55,
            "type": "Washer"
        }))
        .unwrap();
        assert!(input.id.is_none());
        assert_eq!(input.condominium_id, Some(55));
        assert_eq!(input.machine_type.as_deref(), Some("Washer"));
    }
}
