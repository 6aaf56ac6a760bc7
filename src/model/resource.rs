//! Resource record and its canonical JSON form

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::kind::ResourceKind;

/// Timestamp rendering: ISO-8601, microsecond precision, no offset
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Keys owned by the server, never taken from a client body
pub const SERVER_MANAGED_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", "__class__"];

/// A stored resource of any kind
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    kind: ResourceKind,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: Map<String, Value>,
}

impl Resource {
    /// Build a new resource with a fresh id and timestamps.
    ///
    /// Server-managed keys present in `attributes` are dropped.
    pub fn new(kind: ResourceKind, mut attributes: Map<String, Value>) -> Self {
        for field in SERVER_MANAGED_FIELDS {
            attributes.remove(field);
        }
        let now = Utc::now();
        Self {
            kind,
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// String value of a foreign-key field
    pub fn link(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).and_then(Value::as_str)
    }

    /// Set a client attribute. Server-managed keys are ignored.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        if SERVER_MANAGED_FIELDS.contains(&field.as_str()) {
            return;
        }
        self.attributes.insert(field, value);
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Key under which this resource is persisted: `<Class>.<id>`
    pub fn storage_key(&self) -> String {
        format!("{}.{}", self.kind.class_name(), self.id)
    }

    /// Flat JSON object with every attribute plus the server-managed keys
    pub fn to_json(&self) -> Value {
        let mut obj = self.attributes.clone();
        obj.insert("id".into(), Value::String(self.id.clone()));
        obj.insert(
            "created_at".into(),
            Value::String(self.created_at.format(TIME_FORMAT).to_string()),
        );
        obj.insert(
            "updated_at".into(),
            Value::String(self.updated_at.format(TIME_FORMAT).to_string()),
        );
        obj.insert(
            "__class__".into(),
            Value::String(self.kind.class_name().to_string()),
        );
        Value::Object(obj)
    }

    /// Rebuild a resource from its canonical JSON form
    pub fn from_json(value: &Value) -> Result<Self, ResourceDecodeError> {
        let obj = value.as_object().ok_or(ResourceDecodeError::NotAnObject)?;

        let class = string_field(obj, "__class__")?;
        let kind = ResourceKind::from_class_name(class)
            .ok_or_else(|| ResourceDecodeError::UnknownClass(class.to_string()))?;
        let id = string_field(obj, "id")?.to_string();
        let created_at = parse_timestamp(obj, "created_at")?;
        let updated_at = parse_timestamp(obj, "updated_at")?;

        let attributes = obj
            .iter()
            .filter(|(k, _)| !SERVER_MANAGED_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            kind,
            id,
            created_at,
            updated_at,
            attributes,
        })
    }
}

/// Failure to decode a persisted resource
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceDecodeError {
    #[error("resource is not a JSON object")]
    NotAnObject,

    #[error("missing or non-string field: {0}")]
    MissingField(&'static str),

    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}

fn string_field<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ResourceDecodeError> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or(ResourceDecodeError::MissingField(field))
}

fn parse_timestamp(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<DateTime<Utc>, ResourceDecodeError> {
    let raw = string_field(obj, field)?;
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| ResourceDecodeError::InvalidTimestamp {
            field,
            value: raw.to_string(),
        })
}
