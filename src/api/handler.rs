//! # Resource Handler
//!
//! One handler serves all six resource kinds. Per-kind differences
//! (required fields, immutable fields, parent relation, user reference)
//! come from [`ResourceKind`], never from per-kind code.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::model::{Resource, ResourceKind, SERVER_MANAGED_FIELDS};
use crate::storage::Storage;

use super::errors::{ApiError, ApiResult};
use super::request::Payload;
use super::resolver::{sorted, Resolver};
use super::response::ApiResponse;

/// What to do with body keys a kind does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Store them verbatim
    #[default]
    Accept,
    /// Drop them silently
    Ignore,
}

/// Resource handler over an injected storage gateway
#[derive(Clone)]
pub struct ApiHandler {
    storage: Arc<dyn Storage>,
    unknown_fields: UnknownFieldPolicy,
}

impl ApiHandler {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            unknown_fields: UnknownFieldPolicy::default(),
        }
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.storage.as_ref())
    }

    /// Health check payload
    pub fn status(&self) -> ApiResponse {
        ApiResponse::ok(json!({"status": "OK"}))
    }

    /// Stored instance count per kind, keyed by collection name
    pub fn stats(&self) -> ApiResult<ApiResponse> {
        let mut counts = Map::new();
        for kind in ResourceKind::ALL {
            counts.insert(kind.collection().to_string(), json!(self.storage.count(kind)?));
        }
        Ok(ApiResponse::ok(Value::Object(counts)))
    }

    /// List every resource of `kind`, or only the children of `parent_id`
    pub fn list(&self, kind: ResourceKind, parent_id: Option<&str>) -> ApiResult<ApiResponse> {
        let resources = match parent_id {
            None => sorted(self.storage.all(kind)?.into_values().collect()),
            Some(parent_id) => {
                let relation = kind.parent().ok_or(ApiError::NotFound)?;
                self.resolver().children(relation, parent_id)?
            }
        };
        let items = resources.iter().map(Resource::to_json).collect();
        Ok(ApiResponse::ok(Value::Array(items)))
    }

    pub fn get(&self, kind: ResourceKind, id: &str) -> ApiResult<ApiResponse> {
        let resource = self.resolver().resource(kind, id)?;
        Ok(ApiResponse::ok(resource.to_json()))
    }

    pub fn delete(&self, kind: ResourceKind, id: &str) -> ApiResult<ApiResponse> {
        if !self.storage.delete(kind, id)? {
            return Err(ApiError::NotFound);
        }
        self.storage.save()?;
        Ok(ApiResponse::empty())
    }

    /// Create a resource, scoped under `parent_id` for kinds with a parent
    pub fn create(
        &self,
        kind: ResourceKind,
        parent_id: Option<&str>,
        body: Option<Payload>,
    ) -> ApiResult<ApiResponse> {
        let resolver = self.resolver();

        // The container is checked before the body is looked at.
        let parent_link = match (kind.parent(), parent_id) {
            (Some(relation), Some(parent_id)) => {
                let parent = resolver.parent(relation, parent_id)?;
                Some((relation.link_field, parent.id().to_string()))
            }
            (None, None) => None,
            _ => return Err(ApiError::NotFound),
        };

        let mut body = body.ok_or_else(ApiError::not_a_json)?;

        let user_field = kind.user_reference();
        if let Some(field) = user_field {
            if !body.contains_key(field) {
                return Err(ApiError::missing(field));
            }
            resolver.reference(ResourceKind::User, body.get(field))?;
        }

        if let Some(field) = kind
            .required_fields()
            .iter()
            .filter(|f| Some(**f) != user_field)
            .find(|f| !body.contains_key(**f))
        {
            return Err(ApiError::missing(field));
        }

        self.apply_unknown_field_policy(kind, &mut body);
        if let Some((field, parent_id)) = parent_link {
            body.insert(field.to_string(), Value::String(parent_id));
        }

        let resource = self.storage.create(kind, body)?;
        if let Err(e) = self.storage.save() {
            // A failed create leaves nothing reachable under the new id.
            let _ = self.storage.delete(kind, resource.id());
            return Err(e.into());
        }
        Ok(ApiResponse::created(resource.to_json()))
    }

    /// Overwrite every mutable attribute named in the body
    pub fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        body: Option<Payload>,
    ) -> ApiResult<ApiResponse> {
        let mut body = body.ok_or_else(ApiError::not_a_json)?;
        let mut resource = self.resolver().resource(kind, id)?;

        self.apply_unknown_field_policy(kind, &mut body);
        for (field, value) in body {
            if kind.immutable_fields().contains(&field.as_str())
                || SERVER_MANAGED_FIELDS.contains(&field.as_str())
            {
                continue;
            }
            resource.set(field, value);
        }

        let resource = self.storage.update(resource)?.ok_or(ApiError::NotFound)?;
        self.storage.save()?;
        Ok(ApiResponse::ok(resource.to_json()))
    }

    fn apply_unknown_field_policy(&self, kind: ResourceKind, body: &mut Payload) {
        if self.unknown_fields == UnknownFieldPolicy::Ignore {
            body.retain(|field, _| kind.is_known_field(field));
        }
    }
}
