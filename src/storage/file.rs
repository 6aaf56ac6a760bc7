//! JSON file storage backend
//!
//! The whole object map is one JSON object on disk, keyed `<Class>.<id>`.
//! Mutations stay in memory until [`Storage::save`] rewrites the file.
//! [`Storage::close`] re-reads the file, but only when nothing unsaved
//! is pending, so one request's close never drops another's write.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::model::{Resource, ResourceKind};

use super::errors::{StorageError, StorageResult};
use super::objects::{read_lock, write_lock, ObjectMap};
use super::Storage;

/// Storage persisted to a single JSON file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    objects: RwLock<ObjectMap>,
    /// Set while the in-memory map holds mutations not yet on disk.
    /// Only written with the `objects` write lock held.
    dirty: AtomicBool,
}

impl FileStorage {
    /// Open the store at `path`, loading it if the file exists
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let objects = load(&path)?;
        Ok(Self {
            path,
            objects: RwLock::new(objects),
            dirty: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether mutations are waiting for `save`
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

fn load(path: &Path) -> StorageResult<ObjectMap> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ObjectMap::default()),
        Err(e) => {
            return Err(StorageError::io_error(
                format!("failed to read {}", path.display()),
                e,
            ))
        }
    };

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
        StorageError::corrupted(format!("{} is not valid JSON: {}", path.display(), e))
    })?;
    ObjectMap::from_json(&value)
}

impl Storage for FileStorage {
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
        let mut objects = write_lock(&self.objects)?;
        objects.insert(resource.clone());
        self.dirty.store(true, Ordering::SeqCst);
        Ok(resource)
    }

    fn update(&self, mut resource: Resource) -> StorageResult<Option<Resource>> {
        resource.touch();
        let mut objects = write_lock(&self.objects)?;
        if !objects.replace(resource.clone()) {
            return Ok(None);
        }
        self.dirty.store(true, Ordering::SeqCst);
        Ok(Some(resource))
    }

    fn delete(&self, kind: ResourceKind, id: &str) -> StorageResult<bool> {
        let mut objects = write_lock(&self.objects)?;
        let removed = objects.remove(kind, id);
        if removed {
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(removed)
    }

    fn save(&self) -> StorageResult<()> {
        // Held for the whole write so no mutation slips in between
        // serialization and clearing the dirty flag.
        let objects = write_lock(&self.objects)?;

        let bytes = serde_json::to_vec(&objects.to_json())
            .map_err(|e| StorageError::corrupted(format!("failed to encode objects: {}", e)))?;

        let tmp = self.temp_path();
        fs::write(&tmp, &bytes).map_err(|e| {
            StorageError::io_error(format!("failed to write {}", tmp.display()), e)
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            StorageError::io_error(format!("failed to replace {}", self.path.display()), e)
        })?;

        self.dirty.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) -> StorageResult<()> {
        let mut objects = write_lock(&self.objects)?;
        if self.dirty.load(Ordering::SeqCst) {
            return Ok(());
        }
        *objects = load(&self.path)?;
        Ok(())
    }
}
