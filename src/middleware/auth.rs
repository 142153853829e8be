//! Authorization gate middleware
//!
//! Evaluated before any handler logic. A fixed allow-list of public routes
//! bypasses checking entirely; protected route patterns require a role;
//! anything else falls through to the default policy: authenticated, no
//! specific role. The rules table is built once at startup and never
//! mutated, so unsynchronized concurrent reads are safe.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Config;
use crate::error::AppError;
use crate::jwt::roles::{RoleExtractor, ROLE_PREFIX};
use crate::jwt::JwtVerifier;

/// A protected route pattern and the canonical role it requires
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub pattern: String,
    pub required_role: String,
}

/// Immutable route authorization table
#[derive(Debug, Clone)]
pub struct RouteRules {
    public: Vec<String>,
    protected: Vec<RouteRule>,
}

/// Outcome of matching a path against the rules table
#[derive(Debug, PartialEq, Eq)]
pub enum RouteAccess<'a> {
    /// No checking at all
    Public,
    /// Any verified token is enough
    Authenticated,
    /// A verified token carrying this canonical role is required
    RequireRole(&'a str),
}

impl RouteRules {
    pub fn new(public: Vec<String>, protected: Vec<RouteRule>) -> Self {
        Self { public, protected }
    }

    /// The service's route table: resource routes require the manager role,
    /// the access endpoints and probes are public.
    pub fn laundry_defaults(manager_role: &str) -> Self {
        let required_role = format!("{ROLE_PREFIX}{manager_role}");
        let protected = ["/machines", "/machines/**", "/condominiums", "/condominiums/**"]
            .into_iter()
            .map(|pattern| RouteRule {
                pattern: pattern.to_string(),
                required_role: required_role.clone(),
            })
            .collect();

        Self::new(
            ["/home", "/farewell", "/health", "/ready"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            protected,
        )
    }

    pub fn decide(&self, path: &str) -> RouteAccess<'_> {
        if self.public.iter().any(|pattern| pattern_matches(pattern, path)) {
            return RouteAccess::Public;
        }
        if let Some(rule) = self
            .protected
            .iter()
            .find(|rule| pattern_matches(&rule.pattern, path))
        {
            return RouteAccess::RequireRole(&rule.required_role);
        }
        // Absence of a rule does not imply public access.
        RouteAccess::Authenticated
    }
}

/// `"/x"` matches exactly; `"/x/**"` matches `/x` and anything below it.
fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
        None => path == pattern,
    }
}

/// Shared state for the authorization gate
#[derive(Clone)]
pub struct AuthGate {
    rules: Arc<RouteRules>,
    verifier: Arc<JwtVerifier>,
    extractor: Arc<RoleExtractor>,
}

impl AuthGate {
    pub fn new(rules: RouteRules, verifier: JwtVerifier, extractor: RoleExtractor) -> Self {
        Self {
            rules: Arc::new(rules),
            verifier: Arc::new(verifier),
            extractor: Arc::new(extractor),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            RouteRules::laundry_defaults(&config.auth.manager_role),
            JwtVerifier::new(&config.jwt)?,
            RoleExtractor::from_config(&config.auth),
        ))
    }
}

/// Authenticated caller attached to the request for handlers that need it
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject: Option<String>,
    pub roles: BTreeSet<String>,
}

/// Gate middleware: accepts or rejects before any business logic runs.
/// Missing or invalid credentials are a 401; a verified caller lacking the
/// required role is a 403 with a fixed outward phrase.
pub async fn authorization_gate(
    State(gate): State<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if gate.rules.decide(&path) == RouteAccess::Public {
        return next.run(request).await;
    }

    let token = match bearer_token(request.headers()) {
        Ok(token) => token,
        Err(message) => {
            tracing::warn!(path = %path, "Authentication rejected: {}", message);
            return AppError::Unauthenticated(message.to_string()).into_response();
        }
    };

    let claims = match gate.verifier.verify(token) {
        Ok(claims) => claims,
        Err(err) => return AppError::Jwt(err).into_response(),
    };

    let roles = gate.extractor.extract(&claims);

    if let RouteAccess::RequireRole(required_role) = gate.rules.decide(&path) {
        if !roles.contains(required_role) {
            tracing::warn!(
                subject = claims.subject().unwrap_or("<unknown>"),
                path = %path,
                required_role = %required_role,
                "Access denied"
            );
            return AppError::Forbidden("Authorization failed".to_string()).into_response();
        }
    }

    request.extensions_mut().insert(AuthContext {
        subject: claims.subject().map(str::to_string),
        roles,
    });

    next.run(request).await
}

/// Extract the Bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or("Missing authorization token")?;

    let value = header
        .to_str()
        .map_err(|_| "Invalid authorization header encoding")?;

    value
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer scheme")
}
