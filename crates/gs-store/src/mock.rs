//! In-memory store for tests and offline runs.
//!
//! Holds a small catalogue and records the most recent calls so tests can
//! assert which structured query the executor chose.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use gs_protocol::Row;
use serde_json::{Value, json};

use crate::error::{StoreError, StoreResult};
use crate::store::ServiceStore;

struct Department {
    title: String,
    description: Option<String>,
    email: String,
    phone_no: String,
}

struct Service {
    department: usize,
    title: String,
    description: Option<String>,
}

struct DocumentType {
    doc_type: String,
    description: Option<String>,
}

struct Requirement {
    service: usize,
    doc_type: usize,
    is_mandatory: bool,
}

/// Calls kept in the log; older entries are dropped first.
pub const MAX_RECORDED_CALLS: usize = 256;

/// A mock store serving a pre-loaded catalogue.
pub struct MockStore {
    departments: Vec<Department>,
    services: Vec<Service>,
    document_types: Vec<DocumentType>,
    requirements: Vec<Requirement>,
    failure: Option<String>,
    calls: Mutex<VecDeque<String>>,
}

impl MockStore {
    /// An empty catalogue: every call succeeds with no rows.
    pub fn new() -> Self {
        Self {
            departments: Vec::new(),
            services: Vec::new(),
            document_types: Vec::new(),
            requirements: Vec::new(),
            failure: None,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    /// A store whose every call fails, as if the backend were unreachable.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Sample catalogue: immigration, motor traffic, registrar and health.
    pub fn with_sample_data() -> Self {
        let mut m = Self::new();

        let immigration = m.add_department(
            "Department of Immigration and Emigration",
            Some("Passports, visas and citizenship"),
            "info@immigration.gov.lk",
            "0115329000",
        );
        let motor = m.add_department(
            "Department of Motor Traffic",
            Some("Vehicle registration and driving licenses"),
            "info@dmt.gov.lk",
            "0112033333",
        );
        let registrar = m.add_department(
            "Registrar General's Department",
            Some("Births, marriages and deaths"),
            "info@rgd.gov.lk",
            "0112889488",
        );
        let health = m.add_department(
            "Department of Health Services",
            Some("Public health and medical certificates"),
            "info@health.gov.lk",
            "0112694033",
        );

        let nic = m.add_document_type("National Identity Card", Some("Original NIC"));
        let birth = m.add_document_type("Birth Certificate", Some("Original or certified copy"));
        let photo = m.add_document_type("Passport Photographs", Some("Two recent color photos"));
        let old_passport = m.add_document_type("Previous Passport", None);
        let medical = m.add_document_type("Medical Certificate", Some("Issued by a registered doctor"));
        let address = m.add_document_type("Proof of Address", Some("Utility bill under 3 months old"));

        let passport = m.add_service(
            immigration,
            "Passport Application",
            Some("Apply for a new or renewed passport"),
        );
        m.require(passport, nic, true);
        m.require(passport, birth, true);
        m.require(passport, photo, true);
        m.require(passport, old_passport, false);

        let license = m.add_service(
            motor,
            "Driving License",
            Some("Apply for a new driving license"),
        );
        m.require(license, nic, true);
        m.require(license, medical, true);
        m.require(license, address, false);

        let birth_cert = m.add_service(
            registrar,
            "Birth Certificate",
            Some("Obtain a copy of a birth certificate"),
        );
        m.require(birth_cert, nic, true);

        m.add_service(
            registrar,
            "Marriage Certificate",
            Some("Obtain a copy of a marriage certificate"),
        );
        m.add_service(
            health,
            "Medical Certificate Issuance",
            Some("Fitness certificates for employment and licensing"),
        );

        m
    }

    pub fn add_department(
        &mut self,
        title: &str,
        description: Option<&str>,
        email: &str,
        phone_no: &str,
    ) -> usize {
        self.departments.push(Department {
            title: title.into(),
            description: description.map(String::from),
            email: email.into(),
            phone_no: phone_no.into(),
        });
        self.departments.len() - 1
    }

    pub fn add_service(&mut self, department: usize, title: &str, description: Option<&str>) -> usize {
        self.services.push(Service {
            department,
            title: title.into(),
            description: description.map(String::from),
        });
        self.services.len() - 1
    }

    pub fn add_document_type(&mut self, doc_type: &str, description: Option<&str>) -> usize {
        self.document_types.push(DocumentType {
            doc_type: doc_type.into(),
            description: description.map(String::from),
        });
        self.document_types.len() - 1
    }

    pub fn require(&mut self, service: usize, doc_type: usize, is_mandatory: bool) {
        self.requirements.push(Requirement {
            service,
            doc_type,
            is_mandatory,
        });
    }

    /// Recent calls, oldest first, e.g. `"service_requirements(passport)"`.
    pub fn calls(&self) -> Vec<String> {
        let calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        calls.iter().cloned().collect()
    }

    fn record(&self, call: String) -> StoreResult<()> {
        {
            let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
            if calls.len() == MAX_RECORDED_CALLS {
                calls.pop_front();
            }
            calls.push_back(call);
        }
        match &self.failure {
            Some(message) => Err(StoreError::Http(message.clone())),
            None => Ok(()),
        }
    }

    fn department_json(&self, index: usize) -> Value {
        self.departments.get(index).map_or(Value::Null, |d| {
            json!({"title": d.title, "email": d.email, "phone_no": d.phone_no})
        })
    }

    fn requirements_json(&self, service: usize) -> Value {
        let docs: Vec<Value> = self
            .requirements
            .iter()
            .filter(|r| r.service == service)
            .filter_map(|r| {
                let dt = self.document_types.get(r.doc_type)?;
                Some(json!({
                    "is_mandatory": r.is_mandatory,
                    "document_type": {"doc_type": dt.doc_type, "description": dt.description},
                }))
            })
            .collect();
        Value::Array(docs)
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn object(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

#[async_trait]
impl ServiceStore for MockStore {
    async fn service_requirements(&self, service: &str, limit: usize) -> StoreResult<Vec<Row>> {
        self.record(format!("service_requirements({service})"))?;
        Ok(self
            .services
            .iter()
            .enumerate()
            .filter(|(_, s)| contains_ci(&s.title, service))
            .take(limit)
            .map(|(i, s)| {
                object(json!({
                    "title": s.title,
                    "description": s.description,
                    "department": self.department_json(s.department),
                    "required_doc_for_service": self.requirements_json(i),
                }))
            })
            .collect())
    }

    async fn services_with_department(
        &self,
        department: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<Row>> {
        self.record(format!(
            "services_with_department({})",
            department.unwrap_or("*")
        ))?;
        Ok(self
            .services
            .iter()
            .filter(|s| match department {
                Some(name) => self
                    .departments
                    .get(s.department)
                    .is_some_and(|d| contains_ci(&d.title, name)),
                None => true,
            })
            .take(limit)
            .map(|s| {
                object(json!({
                    "title": s.title,
                    "description": s.description,
                    "department": self.department_json(s.department),
                }))
            })
            .collect())
    }

    async fn document_types(&self, limit: usize) -> StoreResult<Vec<Row>> {
        self.record("document_types".into())?;
        Ok(self
            .document_types
            .iter()
            .take(limit)
            .map(|d| object(json!({"doc_type": d.doc_type, "description": d.description})))
            .collect())
    }

    async fn departments(&self, limit: usize) -> StoreResult<Vec<Row>> {
        self.record("departments".into())?;
        Ok(self
            .departments
            .iter()
            .take(limit)
            .map(|d| {
                object(json!({
                    "title": d.title,
                    "description": d.description,
                    "email": d.email,
                    "phone_no": d.phone_no,
                }))
            })
            .collect())
    }

    async fn services(&self, limit: usize) -> StoreResult<Vec<Row>> {
        self.record("services".into())?;
        Ok(self
            .services
            .iter()
            .take(limit)
            .map(|s| object(json!({"title": s.title, "description": s.description})))
            .collect())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}
