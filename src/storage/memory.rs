//! Process-local storage backend

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::model::{Resource, ResourceKind};

use super::errors::StorageResult;
use super::objects::{read_lock, write_lock, ObjectMap};
use super::Storage;

/// Storage that lives and dies with the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: RwLock<ObjectMap>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn all(&self, kind: ResourceKind) -> StorageResult<BTreeMap<String, Resource>> {
        Ok(read_lock(&self.objects)?.all(kind))
    }

    fn get(&self, kind: ResourceKind, id: &str) -> StorageResult<Option<Resource>> {
        Ok(read_lock(&self.objects)?.get(kind, id))
    }

    fn count(&self, kind: ResourceKind) -> StorageResult<usize> {
        Ok(read_lock(&self.objects)?.count(kind))
    }

    fn create(
        &self,
        kind: ResourceKind,
        attributes: Map<String, Value>,
    ) -> StorageResult<Resource> {
        let resource = Resource::new(kind, attributes);
        write_lock(&self.objects)?.insert(resource.clone());
        Ok(resource)
    }

    fn update(&self, mut resource: Resource) -> StorageResult<Option<Resource>> {
        resource.touch();
        let replaced = write_lock(&self.objects)?.replace(resource.clone());
        Ok(replaced.then_some(resource))
    }

    fn delete(&self, kind: ResourceKind, id: &str) -> StorageResult<bool> {
        Ok(write_lock(&self.objects)?.remove(kind, id))
    }

    fn save(&self) -> StorageResult<()> {
        Ok(())
    }

    fn close(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_create_then_get() {
        let storage = MemoryStorage::new();
        let mut attrs = Map::new();
        attrs.insert("name".into(), json!("Wifi"));
        let created = storage.create(ResourceKind::Amenity, attrs).unwrap();

        let fetched = storage.get(ResourceKind::Amenity, created.id()).unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(storage.count(ResourceKind::Amenity).unwrap(), 1);
    }

    #[test]
    fn test_update_refreshes_updated_at() {
        let storage = MemoryStorage::new();
        let created = storage.create(ResourceKind::State, Map::new()).unwrap();
        thread::sleep(std::time::Duration::from_millis(2));

        let updated = storage.update(created.clone()).unwrap().unwrap();
        assert_eq!(updated.created_at(), created.created_at());
        assert!(updated.updated_at() > created.updated_at());
    }

    #[test]
    fn test_update_after_delete_returns_none() {
        let storage = MemoryStorage::new();
        let created = storage.create(ResourceKind::State, Map::new()).unwrap();
        assert!(storage.delete(ResourceKind::State, created.id()).unwrap());
        assert_eq!(storage.update(created).unwrap(), None);
        assert_eq!(storage.count(ResourceKind::State).unwrap(), 0);
    }

    #[test]
    fn test_concurrent_creates_all_land() {
        let storage = Arc::new(MemoryStorage::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let storage = Arc::clone(&storage);
                thread::spawn(move || {
                    for _ in 0..25 {
                        storage.create(ResourceKind::User, Map::new()).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(storage.count(ResourceKind::User).unwrap(), 200);
    }
}
