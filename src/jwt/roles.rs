//! Role extraction from identity-token claims
//!
//! Providers emit group/role information under different claim names and
//! shapes (a flat list, or a list nested under a key inside an object).
//! Both are deployment configuration; extraction normalizes either shape to
//! the same canonical role set and never fails — anything unrecognized
//! yields an empty set.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::config::AuthConfig;
use crate::jwt::Claims;

/// Prefix applied to every raw role name to form its canonical internal form
pub const ROLE_PREFIX: &str = "ROLE_";

/// Where the role list lives inside the configured claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleClaimShape {
    /// The claim value is the list itself, e.g. `"cognito:groups": ["a"]`
    FlatList,
    /// The claim value is an object holding the list under a key,
    /// e.g. `"realm_access": {"roles": ["a"]}`
    NestedUnderKey(String),
}

/// Converts verified claims into the canonical role set
#[derive(Debug, Clone)]
pub struct RoleExtractor {
    claim: String,
    shape: RoleClaimShape,
}

impl RoleExtractor {
    pub fn new(claim: impl Into<String>, shape: RoleClaimShape) -> Self {
        Self {
            claim: claim.into(),
            shape,
        }
    }

    /// Build from configuration; shape strings are "flat" or "nested:<key>"
    pub fn from_config(auth: &AuthConfig) -> Self {
        let shape = match auth.role_claim_shape.split_once(':') {
            Some(("nested", key)) if !key.is_empty() => {
                RoleClaimShape::NestedUnderKey(key.to_string())
            }
            _ => {
                if auth.role_claim_shape != "flat" {
                    tracing::warn!(
                        shape = %auth.role_claim_shape,
                        "Unknown role claim shape, falling back to flat"
                    );
                }
                RoleClaimShape::FlatList
            }
        };
        Self::new(auth.role_claim.clone(), shape)
    }

    /// Extract the canonical role set from the claims.
    ///
    /// An absent, null, empty or unrecognized claim yields an empty set.
    pub fn extract(&self, claims: &Claims) -> BTreeSet<String> {
        let value = match claims.get(&self.claim) {
            Some(value) => value,
            None => return BTreeSet::new(),
        };

        let list = match &self.shape {
            RoleClaimShape::FlatList => value.as_array(),
            RoleClaimShape::NestedUnderKey(key) => {
                value.as_object().and_then(|map| map.get(key)).and_then(Value::as_array)
            }
        };

        list.map(|roles| {
            roles
                .iter()
                .filter_map(Value::as_str)
                .map(|role| format!("{ROLE_PREFIX}{role}"))
                .collect()
        })
        .unwrap_or_default()
    }
}
