//! Client trait for resource collections

use crate::core::error::TransportError;
use crate::core::resource::{Record, RecordId, Resource};
use async_trait::async_trait;
use std::fmt;

/// The four calls a resource client can make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for one REST collection endpoint
///
/// Implementations talk to `/<resource>`. The server owns identifiers and is
/// the authority on the collection; a failed call is reported as-is and never
/// retried.
#[async_trait]
pub trait ResourceClient<R: Resource>: Send + Sync {
    /// Fetch the whole collection, in server order
    async fn list(&self) -> Result<Vec<Record<R>>, TransportError>;

    /// Create a record; the server assigns the id
    async fn create(&self, payload: &R) -> Result<Record<R>, TransportError>;

    /// Replace the record stored under `id`
    async fn update(&self, id: &RecordId, payload: &R) -> Result<Record<R>, TransportError>;

    /// Delete a record by id
    async fn delete(&self, id: &RecordId) -> Result<(), TransportError>;
}

#[async_trait]
impl<R, C> ResourceClient<R> for std::sync::Arc<C>
where
    R: Resource,
    C: ResourceClient<R> + ?Sized,
{
    async fn list(&self) -> Result<Vec<Record<R>>, TransportError> {
        (**self).list().await
    }

    async fn create(&self, payload: &R) -> Result<Record<R>, TransportError> {
        (**self).create(payload).await
    }

    async fn update(&self, id: &RecordId, payload: &R) -> Result<Record<R>, TransportError> {
        (**self).update(id, payload).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), TransportError> {
        (**self).delete(id).await
    }
}
