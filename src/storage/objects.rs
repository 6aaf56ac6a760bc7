//! In-memory object map shared by every storage backend

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

use crate::model::{Resource, ResourceKind};

use super::errors::{StorageError, StorageResult};

/// Resources grouped by kind, then id
#[derive(Debug, Default, Clone)]
pub(crate) struct ObjectMap {
    objects: HashMap<ResourceKind, BTreeMap<String, Resource>>,
}

impl ObjectMap {
    pub(crate) fn all(&self, kind: ResourceKind) -> BTreeMap<String, Resource> {
        self.objects.get(&kind).cloned().unwrap_or_default()
    }

    pub(crate) fn get(&self, kind: ResourceKind, id: &str) -> Option<Resource> {
        self.objects.get(&kind).and_then(|m| m.get(id)).cloned()
    }

    pub(crate) fn count(&self, kind: ResourceKind) -> usize {
        self.objects.get(&kind).map_or(0, BTreeMap::len)
    }

    pub(crate) fn insert(&mut self, resource: Resource) {
        self.objects
            .entry(resource.kind())
            .or_default()
            .insert(resource.id().to_string(), resource);
    }

    /// Replace an existing entry; absent entries are left absent
    pub(crate) fn replace(&mut self, resource: Resource) -> bool {
        match self
            .objects
            .get_mut(&resource.kind())
            .and_then(|m| m.get_mut(resource.id()))
        {
            Some(slot) => {
                *slot = resource;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, kind: ResourceKind, id: &str) -> bool {
        self.objects
            .get_mut(&kind)
            .map_or(false, |m| m.remove(id).is_some())
    }

    /// Persisted form: `{"<Class>.<id>": <canonical JSON>, ...}`
    pub(crate) fn to_json(&self) -> Value {
        let mut out = Map::new();
        for resource in self.objects.values().flat_map(BTreeMap::values) {
            out.insert(resource.storage_key(), resource.to_json());
        }
        Value::Object(out)
    }

    pub(crate) fn from_json(value: &Value) -> StorageResult<Self> {
        let entries = value
            .as_object()
            .ok_or_else(|| StorageError::corrupted("storage file is not a JSON object"))?;

        let mut map = ObjectMap::default();
        for (key, entry) in entries {
            let resource = Resource::from_json(entry)
                .map_err(|e| StorageError::corrupted(format!("{}: {}", key, e)))?;
            if resource.storage_key() != *key {
                return Err(StorageError::corrupted(format!(
                    "key {} does not match stored object {}",
                    key,
                    resource.storage_key()
                )));
            }
            map.insert(resource);
        }
        Ok(map)
    }
}

pub(crate) fn read_lock(lock: &RwLock<ObjectMap>) -> StorageResult<RwLockReadGuard<'_, ObjectMap>> {
    lock.read().map_err(|_| StorageError::lock_poisoned())
}

pub(crate) fn write_lock(
    lock: &RwLock<ObjectMap>,
) -> StorageResult<RwLockWriteGuard<'_, ObjectMap>> {
    lock.write().map_err(|_| StorageError::lock_poisoned())
}
