//! Relationship resolution
//!
//! One code path serves City↔State, Place↔City and Review↔Place, driven by
//! the [`Relation`] table, plus the User cross-reference check for Place and
//! Review.

use serde_json::Value;

use crate::model::{Relation, Resource, ResourceKind};
use crate::storage::Storage;

use super::errors::{ApiError, ApiResult};

/// Walks relations through a storage gateway
pub struct Resolver<'a> {
    storage: &'a dyn Storage,
}

impl<'a> Resolver<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Look up one resource, failing with NotFound
    pub fn resource(&self, kind: ResourceKind, id: &str) -> ApiResult<Resource> {
        self.storage.get(kind, id)?.ok_or(ApiError::NotFound)
    }

    /// The container a scoped route names
    pub fn parent(&self, relation: Relation, parent_id: &str) -> ApiResult<Resource> {
        self.resource(relation.parent, parent_id)
    }

    /// Children of an existing parent, computed from storage on every call
    pub fn children(&self, relation: Relation, parent_id: &str) -> ApiResult<Vec<Resource>> {
        let parent = self.parent(relation, parent_id)?;
        let children = self
            .storage
            .all(relation.child)?
            .into_values()
            .filter(|child| relation.links(child, parent.id()))
            .collect();
        Ok(sorted(children))
    }

    /// Resolve a foreign-key value. Only a string id can resolve.
    pub fn reference(&self, kind: ResourceKind, value: Option<&Value>) -> ApiResult<Resource> {
        let id = value.and_then(Value::as_str).ok_or(ApiError::NotFound)?;
        self.resource(kind, id)
    }
}

/// Listing order: creation time, then id
pub(crate) fn sorted(mut resources: Vec<Resource>) -> Vec<Resource> {
    resources.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
    resources
}
