//! Condominium domain model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::ValidateEmail;

use super::{
    CONDOMINIUM_ADDRESS_NOT_EMPTY_NULL, CONDOMINIUM_CONTACT_NOT_EMPTY_NULL,
    CONDOMINIUM_EMAIL_FORMAT_NOT_VALID, CONDOMINIUM_EMAIL_NOT_EMPTY_NULL,
    CONDOMINIUM_NAME_NOT_EMPTY_NULL,
};
use crate::error::{AppError, Result};

/// Condominium entity. Owns zero or more machines; the back-reference lives
/// on the machine side only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Condominium {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
    pub email: String,
}

/// Raw condominium request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondominiumInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Shape-validated condominium input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCondominium {
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
    pub email: String,
}

impl CondominiumInput {
    /// Validate field presence in declaration order, then the email format.
    /// The first failing rule wins.
    pub fn validated(&self) -> Result<NewCondominium> {
        let name = require_text(&self.name, CONDOMINIUM_NAME_NOT_EMPTY_NULL)?;
        let address = require_text(&self.address, CONDOMINIUM_ADDRESS_NOT_EMPTY_NULL)?;
        let contact_phone = require_text(&self.contact_phone, CONDOMINIUM_CONTACT_NOT_EMPTY_NULL)?;
        let email = require_text(&self.email, CONDOMINIUM_EMAIL_NOT_EMPTY_NULL)?;

        if !email.validate_email() {
            return Err(AppError::Validation(
                CONDOMINIUM_EMAIL_FORMAT_NOT_VALID.to_string(),
            ));
        }

        Ok(NewCondominium {
            id: self.id,
            name,
            address,
            contact_phone,
            email,
        })
    }
}

pub(super) fn require_text(value: &Option<String>, message: &str) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.clone()),
        _ => Err(AppError::Validation(message.to_string())),
    }
}
