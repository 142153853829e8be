//! Configuration management for the laundry service

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// JWT verification configuration
    pub jwt: JwtConfig,
    /// Authorization configuration
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 shared secret, used when no public key is configured
    pub secret: String,
    /// Expected token issuer; skipped when unset
    pub issuer: Option<String>,
    /// RS256 public key in PEM format (takes precedence over the secret)
    pub public_key_pem: Option<String>,
}

/// Identity-provider specific claim mapping.
///
/// Different providers place group/role information under different claim
/// names and shapes, so both are deployment-time values rather than code
/// constants.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Name of the claim carrying the caller's groups/roles
    pub role_claim: String,
    /// Shape of the role claim: "flat" or "nested:<key>"
    pub role_claim_shape: String,
    /// Raw provider-side name of the manager role
    pub manager_role: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                issuer: env::var("JWT_ISSUER").ok(),
                public_key_pem: env::var("JWT_PUBLIC_KEY")
                    .ok()
                    .map(|value| value.replace("\\n", "\n")),
            },
            auth: AuthConfig {
                role_claim: env::var("AUTH_ROLE_CLAIM")
                    .unwrap_or_else(|_| "cognito:groups".to_string()),
                role_claim_shape: env::var("AUTH_ROLE_CLAIM_SHAPE")
                    .unwrap_or_else(|_| "flat".to_string()),
                manager_role: env::var("AUTH_MANAGER_ROLE")
                    .unwrap_or_else(|_| "laundry-manager".to_string()),
            },
        })
    }

    /// HTTP bind address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
