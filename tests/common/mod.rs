//! Common test utilities
//!
//! Drives the full router over in-memory repository implementations, with
//! real HS256 tokens signed by the test secret. The in-memory machine store
//! enforces the same composite uniqueness constraint as the database schema.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use laundry_core::config::{AuthConfig, JwtConfig};
use laundry_core::domain::{Condominium, Machine, NewCondominium, NewMachine};
use laundry_core::error::{AppError, Result};
use laundry_core::jwt::roles::RoleExtractor;
use laundry_core::jwt::JwtVerifier;
use laundry_core::middleware::auth::{AuthGate, RouteRules};
use laundry_core::pagination::{PaginationRequest, SortDirection, StorePage};
use laundry_core::repository::{CondominiumRepository, MachineRepository};
use laundry_core::server::build_router;
use laundry_core::service::{CondominiumService, MachineService};
use laundry_core::state::HasServices;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-purposes";

#[derive(Default)]
pub struct InMemoryCondominiumRepository {
    rows: Mutex<Vec<Condominium>>,
    next_id: AtomicI64,
}

impl InMemoryCondominiumRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn seed(&self, condominium: Condominium) {
        let mut rows = self.rows.lock().unwrap();
        self.next_id
            .fetch_max(condominium.id + 1, Ordering::SeqCst);
        rows.push(condominium);
    }
}

fn sorted_page<T: Clone>(
    mut rows: Vec<T>,
    request: &PaginationRequest,
    compare: impl Fn(&T, &T) -> std::cmp::Ordering,
) -> StorePage<T> {
    rows.sort_by(|a, b| match request.direction {
        SortDirection::Asc => compare(a, b),
        SortDirection::Desc => compare(b, a),
    });
    let total = rows.len() as i64;
    let items = rows
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.size as usize)
        .collect();
    StorePage::new(items, request, total)
}

#[async_trait]
impl CondominiumRepository for InMemoryCondominiumRepository {
    async fn create(&self, input: &NewCondominium) -> Result<Condominium> {
        let condominium = Condominium {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: input.name.clone(),
            address: input.address.clone(),
            contact_phone: input.contact_phone.clone(),
            email: input.email.clone(),
        };
        self.rows.lock().unwrap().push(condominium.clone());
        Ok(condominium)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Condominium>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|row| row.id == id))
    }

    async fn find_all(&self, page: &PaginationRequest) -> Result<StorePage<Condominium>> {
        let rows = self.rows.lock().unwrap().clone();
        match page.sort_by.as_str() {
            "id" => Ok(sorted_page(rows, page, |a, b| a.id.cmp(&b.id))),
            "name" => Ok(sorted_page(rows, page, |a, b| a.name.cmp(&b.name))),
            "email" => Ok(sorted_page(rows, page, |a, b| a.email.cmp(&b.email))),
            other => Err(AppError::Internal(anyhow::anyhow!(
                "No sortable column matches '{other}' on condominiums"
            ))),
        }
    }
}

#[derive(Default)]
pub struct InMemoryMachineRepository {
    rows: Mutex<Vec<Machine>>,
    next_id: AtomicI64,
}

impl InMemoryMachineRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn seed(&self, machine: Machine) {
        let mut rows = self.rows.lock().unwrap();
        self.next_id.fetch_max(machine.id + 1, Ordering::SeqCst);
        rows.push(machine);
    }
}

#[async_trait]
impl MachineRepository for InMemoryMachineRepository {
    async fn create(&self, input: &NewMachine) -> Result<Machine> {
        let mut rows = self.rows.lock().unwrap();
        // Same constraint the schema enforces with its composite unique key.
        if rows.iter().any(|row| {
            row.condominium_id == input.condominium_id && row.identifier == input.identifier
        }) {
            return Err(AppError::MachineIdentifierInUse);
        }
        let machine = Machine {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            identifier: input.identifier.clone(),
            machine_type: input.machine_type.clone(),
            condominium_id: input.condominium_id,
        };
        rows.push(machine.clone());
        Ok(machine)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Machine>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|row| row.id == id))
    }

    async fn find_by_condominium_and_identifier(
        &self,
        condominium_id: i64,
        identifier: &str,
    ) -> Result<Option<Machine>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.condominium_id == condominium_id && row.identifier == identifier)
            .cloned())
    }

    async fn update(&self, id: i64, input: &NewMachine) -> Result<Machine> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|row| {
            row.id != id
                && row.condominium_id == input.condominium_id
                && row.identifier == input.identifier
        }) {
            return Err(AppError::MachineIdentifierInUse);
        }
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(AppError::MachineNotFound)?;
        row.identifier = input.identifier.clone();
        row.machine_type = input.machine_type.clone();
        row.condominium_id = input.condominium_id;
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(AppError::MachineNotFound);
        }
        Ok(())
    }

    async fn find_all(&self, page: &PaginationRequest) -> Result<StorePage<Machine>> {
        let rows = self.rows.lock().unwrap().clone();
        match page.sort_by.as_str() {
            "id" => Ok(sorted_page(rows, page, |a, b| a.id.cmp(&b.id))),
            "identifier" => Ok(sorted_page(rows, page, |a, b| {
                a.identifier.cmp(&b.identifier)
            })),
            "type" => Ok(sorted_page(rows, page, |a, b| {
                a.machine_type.cmp(&b.machine_type)
            })),
            other => Err(AppError::Internal(anyhow::anyhow!(
                "No sortable column matches '{other}' on machines"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct TestState {
    machine_service:
        Arc<MachineService<InMemoryMachineRepository, InMemoryCondominiumRepository>>,
    condominium_service: Arc<CondominiumService<InMemoryCondominiumRepository>>,
}

impl HasServices for TestState {
    type MachineRepo = InMemoryMachineRepository;
    type CondominiumRepo = InMemoryCondominiumRepository;

    fn machine_service(&self) -> &MachineService<Self::MachineRepo, Self::CondominiumRepo> {
        &self.machine_service
    }

    fn condominium_service(&self) -> &CondominiumService<Self::CondominiumRepo> {
        &self.condominium_service
    }

    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send {
        std::future::ready(true)
    }
}

pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Build an app with the standard seed data: condominiums 55 and 56,
    /// and machine 101 ("test-identifier", Washer) in condominium 55.
    pub fn spawn() -> Self {
        let condominium_repo = Arc::new(InMemoryCondominiumRepository::new());
        condominium_repo.seed(Condominium {
            id: 55,
            name: "Central Park".to_string(),
            address: "123 Main St".to_string(),
            contact_phone: "123456789".to_string(),
            email: "test@test.com".to_string(),
        });
        condominium_repo.seed(Condominium {
            id: 56,
            name: "Riverside".to_string(),
            address: "456 River Rd".to_string(),
            contact_phone: "987654321".to_string(),
            email: "riverside@test.com".to_string(),
        });

        let machine_repo = Arc::new(InMemoryMachineRepository::new());
        machine_repo.seed(Machine {
            id: 101,
            identifier: "test-identifier".to_string(),
            machine_type: "Washer".to_string(),
            condominium_id: 55,
        });

        Self::with_repos(machine_repo, condominium_repo)
    }

    pub fn with_repos(
        machine_repo: Arc<InMemoryMachineRepository>,
        condominium_repo: Arc<InMemoryCondominiumRepository>,
    ) -> Self {
        let state = TestState {
            machine_service: Arc::new(MachineService::new(
                machine_repo,
                condominium_repo.clone(),
            )),
            condominium_service: Arc::new(CondominiumService::new(condominium_repo)),
        };

        let jwt = JwtConfig {
            secret: TEST_SECRET.to_string(),
            issuer: None,
            public_key_pem: None,
        };
        let auth = AuthConfig {
            role_claim: "cognito:groups".to_string(),
            role_claim_shape: "flat".to_string(),
            manager_role: "laundry-manager".to_string(),
        };
        let gate = AuthGate::new(
            RouteRules::laundry_defaults(&auth.manager_role),
            JwtVerifier::new(&jwt).expect("Failed to create verifier"),
            RoleExtractor::from_config(&auth),
        );

        Self {
            router: build_router(state, gate),
        }
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Option<Value>) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).ok();
        (status, json)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Option<Value>) {
        self.request("GET", path, token, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Option<Value>) {
        self.request("POST", path, token, Some(body)).await
    }

    pub async fn put(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Option<Value>) {
        self.request("PUT", path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Option<Value>) {
        self.request("DELETE", path, token, None).await
    }
}

fn sign(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Token carrying the manager role
pub fn manager_token() -> String {
    sign(serde_json::json!({
        "sub": "test_user",
        "cognito:groups": ["laundry-manager"],
        "exp": 4_102_444_800i64,
    }))
}

/// Verified token with no role claim at all
pub fn no_role_token() -> String {
    sign(serde_json::json!({
        "sub": "test_user",
        "exp": 4_102_444_800i64,
    }))
}

/// Verified token with a role that grants nothing here
pub fn resident_token() -> String {
    sign(serde_json::json!({
        "sub": "test_user",
        "cognito:groups": ["resident"],
        "exp": 4_102_444_800i64,
    }))
}
