//! Storage Gateway for hbnb
//!
//! Handlers never touch persistence directly. They receive a [`Storage`]
//! implementation and go through its get/all/count/create/update/delete
//! surface, calling [`Storage::save`] after each mutation. The serving
//! layer calls [`Storage::close`] once per request.
//!
//! # Implementations
//!
//! - [`MemoryStorage`]: process-local map, nothing persisted
//! - [`FileStorage`]: same map, persisted as one JSON file keyed `<Class>.<id>`
//!
//! Concurrent mutations on different ids never corrupt the map. Concurrent
//! writes to the same id are last-write-wins.

mod errors;
mod file;
mod memory;
mod objects;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::model::{Resource, ResourceKind};

pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Persistence gateway consumed by the API handlers
pub trait Storage: Send + Sync {
    /// Every stored resource of `kind`, keyed by id
    fn all(&self, kind: ResourceKind) -> StorageResult<BTreeMap<String, Resource>>;

    /// One resource by id
    fn get(&self, kind: ResourceKind, id: &str) -> StorageResult<Option<Resource>>;

    /// Number of stored resources of `kind`
    fn count(&self, kind: ResourceKind) -> StorageResult<usize>;

    /// Register a new resource. The gateway assigns id and timestamps.
    fn create(&self, kind: ResourceKind, attributes: Map<String, Value>)
        -> StorageResult<Resource>;

    /// Replace a stored resource, refreshing `updated_at`.
    ///
    /// Returns `None` when the resource is no longer stored.
    fn update(&self, resource: Resource) -> StorageResult<Option<Resource>>;

    /// Remove a resource. Returns whether it existed.
    fn delete(&self, kind: ResourceKind, id: &str) -> StorageResult<bool>;

    /// Persist all pending mutations
    fn save(&self) -> StorageResult<()>;

    /// End the current unit of work
    fn close(&self) -> StorageResult<()>;
}
