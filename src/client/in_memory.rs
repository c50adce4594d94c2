//! In-memory implementation of ResourceClient for testing and development

use crate::core::error::TransportError;
use crate::core::resource::{Record, RecordId, Resource};
use crate::core::service::{Operation, ResourceClient};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory resource collection
///
/// Behaves like the REST endpoint: assigns ids on create, keeps insertion
/// order, answers 404 for unknown ids. Failures can be injected per
/// operation and every call is counted, so tests can assert that an action
/// did or did not reach the "server".
#[derive(Clone)]
pub struct InMemoryResourceClient<R> {
    records: Arc<RwLock<IndexMap<RecordId, R>>>,
    pending_failures: Arc<RwLock<Vec<Operation>>>,
    calls: Arc<RwLock<HashMap<Operation, usize>>>,
}

impl<R: Resource> InMemoryResourceClient<R> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
            pending_failures: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a collection holding the given records, in order
    pub fn with_records(records: Vec<Record<R>>) -> Self {
        let client = Self::new();
        if let Ok(mut map) = client.records.write() {
            map.extend(records.into_iter().map(|r| (r.id, r.data)));
        }
        client
    }

    /// Make the next call of `operation` fail with a network error
    pub fn fail_next(&self, operation: Operation) {
        if let Ok(mut failures) = self.pending_failures.write() {
            failures.push(operation);
        }
    }

    /// How many times `operation` has been called
    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls
            .read()
            .map(|calls| calls.get(&operation).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Calls of any kind
    pub fn total_calls(&self) -> usize {
        self.calls
            .read()
            .map(|calls| calls.values().sum())
            .unwrap_or(0)
    }

    /// Current contents, bypassing call accounting
    pub fn snapshot(&self) -> Vec<Record<R>> {
        self.records
            .read()
            .map(|map| {
                map.iter()
                    .map(|(id, data)| Record::new(id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Count the call and consume an injected failure if one is pending
    fn begin(&self, operation: Operation) -> Result<(), TransportError> {
        if let Ok(mut calls) = self.calls.write() {
            *calls.entry(operation).or_insert(0) += 1;
        }

        let mut failures = self
            .pending_failures
            .write()
            .map_err(|e| lock_error::<R>(operation, e))?;
        if let Some(pos) = failures.iter().position(|op| *op == operation) {
            failures.remove(pos);
            return Err(TransportError::Network {
                resource: R::KIND.path(),
                operation,
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

impl<R: Resource> Default for InMemoryResourceClient<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error<R: Resource>(operation: Operation, e: impl std::fmt::Display) -> TransportError {
    TransportError::Network {
        resource: R::KIND.path(),
        operation,
        message: format!("Failed to acquire lock: {}", e),
    }
}

fn not_found<R: Resource>(operation: Operation, id: &RecordId) -> TransportError {
    TransportError::Status {
        resource: R::KIND.path(),
        operation,
        status: 404,
        body: format!("{} '{}' not found", R::KIND.label(), id),
    }
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for InMemoryResourceClient<R> {
    async fn list(&self) -> Result<Vec<Record<R>>, TransportError> {
        self.begin(Operation::List)?;
        let records = self
            .records
            .read()
            .map_err(|e| lock_error::<R>(Operation::List, e))?;

        Ok(records
            .iter()
            .map(|(id, data)| Record::new(id.clone(), data.clone()))
            .collect())
    }

    async fn create(&self, payload: &R) -> Result<Record<R>, TransportError> {
        self.begin(Operation::Create)?;
        let mut records = self
            .records
            .write()
            .map_err(|e| lock_error::<R>(Operation::Create, e))?;

        let id = RecordId::new(Uuid::new_v4().to_string());
        records.insert(id.clone(), payload.clone());

        Ok(Record::new(id, payload.clone()))
    }

    async fn update(&self, id: &RecordId, payload: &R) -> Result<Record<R>, TransportError> {
        self.begin(Operation::Update)?;
        let mut records = self
            .records
            .write()
            .map_err(|e| lock_error::<R>(Operation::Update, e))?;

        let slot = records
            .get_mut(id)
            .ok_or_else(|| not_found::<R>(Operation::Update, id))?;
        *slot = payload.clone();

        Ok(Record::new(id.clone(), payload.clone()))
    }

    async fn delete(&self, id: &RecordId) -> Result<(), TransportError> {
        self.begin(Operation::Delete)?;
        let mut records = self
            .records
            .write()
            .map_err(|e| lock_error::<R>(Operation::Delete, e))?;

        records
            .shift_remove(id)
            .ok_or_else(|| not_found::<R>(Operation::Delete, id))?;

        Ok(())
    }
}
