//! REST implementation of [`ResourceClient`] over reqwest

use crate::config::ConsoleConfig;
use crate::core::error::TransportError;
use crate::core::resource::{Record, RecordId, Resource};
use crate::core::service::{Operation, ResourceClient};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Talks JSON to `<base_url>/<path>` and `<base_url>/<path>/<id>`
#[derive(Debug, Clone)]
pub struct HttpResourceClient<R> {
    http: reqwest::Client,
    base_url: String,
    path: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpResourceClient<R> {
    /// Client for the resource's default collection path
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            path: R::KIND.path().to_string(),
            _resource: PhantomData,
        }
    }

    /// Client configured from [`ConsoleConfig`], honouring path overrides
    pub fn from_config(http: reqwest::Client, config: &ConsoleConfig) -> Self {
        Self::new(http, config.api.base_url.as_str()).with_path(config.resource_path(R::KIND))
    }

    /// Override the collection path segment
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into().trim_matches('/').to_string();
        self
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.path)
    }

    pub fn item_url(&self, id: &RecordId) -> String {
        format!("{}/{}/{}", self.base_url, self.path, id)
    }

    fn network_error(&self, operation: Operation, err: reqwest::Error) -> TransportError {
        TransportError::Network {
            resource: R::KIND.path(),
            operation,
            message: err.to_string(),
        }
    }

    /// Send the request and turn any non-2xx answer into an error
    async fn execute(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.network_error(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                resource = R::KIND.path(),
                operation = %operation,
                status = status.as_u16(),
                "request rejected by server"
            );
            return Err(TransportError::Status {
                resource: R::KIND.path(),
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.network_error(operation, e))?;
        Ok(bytes.to_vec())
    }

    fn decode<T: DeserializeOwned>(
        &self,
        operation: Operation,
        body: &[u8],
    ) -> Result<T, TransportError> {
        serde_json::from_slice(body).map_err(|e| TransportError::Decode {
            resource: R::KIND.path(),
            operation,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for HttpResourceClient<R> {
    async fn list(&self) -> Result<Vec<Record<R>>, TransportError> {
        let url = self.collection_url();
        tracing::debug!(resource = R::KIND.path(), %url, "GET collection");

        let body = self.execute(Operation::List, self.http.get(&url)).await?;
        let records: Vec<Record<R>> = self.decode(Operation::List, &body)?;

        tracing::debug!(resource = R::KIND.path(), count = records.len(), "collection fetched");
        Ok(records)
    }

    async fn create(&self, payload: &R) -> Result<Record<R>, TransportError> {
        let url = self.collection_url();
        tracing::debug!(resource = R::KIND.path(), %url, "POST record");

        let body = self
            .execute(Operation::Create, self.http.post(&url).json(payload))
            .await?;
        let record: Record<R> = self.decode(Operation::Create, &body)?;

        tracing::info!(resource = R::KIND.path(), id = %record.id, "record created");
        Ok(record)
    }

    async fn update(&self, id: &RecordId, payload: &R) -> Result<Record<R>, TransportError> {
        let url = self.item_url(id);
        tracing::debug!(resource = R::KIND.path(), %url, "PUT record");

        let body = self
            .execute(Operation::Update, self.http.put(&url).json(payload))
            .await?;

        // Some endpoints answer an update with an empty body
        let record = if body.iter().all(u8::is_ascii_whitespace) {
            Record::new(id.clone(), payload.clone())
        } else {
            self.decode(Operation::Update, &body)?
        };

        tracing::info!(resource = R::KIND.path(), id = %id, "record updated");
        Ok(record)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), TransportError> {
        let url = self.item_url(id);
        tracing::debug!(resource = R::KIND.path(), %url, "DELETE record");

        self.execute(Operation::Delete, self.http.delete(&url)).await?;

        tracing::info!(resource = R::KIND.path(), id = %id, "record deleted");
        Ok(())
    }
}
