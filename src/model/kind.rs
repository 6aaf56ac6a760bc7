//! Resource kind vocabulary
//!
//! Every kind has two spellings: the class name used as the storage key
//! prefix (`City`) and the collection name used in URLs and stats (`cities`).
//! Both parse to the same [`ResourceKind`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::relation::Relation;

/// One of the six resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl ResourceKind {
    /// All kinds, in collection-name order
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Amenity,
        ResourceKind::City,
        ResourceKind::Place,
        ResourceKind::Review,
        ResourceKind::State,
        ResourceKind::User,
    ];

    /// Class name, as written in `__class__` and storage keys
    pub fn class_name(&self) -> &'static str {
        match self {
            ResourceKind::Amenity => "Amenity",
            ResourceKind::City => "City",
            ResourceKind::Place => "Place",
            ResourceKind::Review => "Review",
            ResourceKind::State => "State",
            ResourceKind::User => "User",
        }
    }

    /// Collection name, as used in URLs and the stats payload
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Amenity => "amenities",
            ResourceKind::City => "cities",
            ResourceKind::Place => "places",
            ResourceKind::Review => "reviews",
            ResourceKind::State => "states",
            ResourceKind::User => "users",
        }
    }

    /// Fields a create body must carry, in the order they are checked
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Amenity | ResourceKind::City | ResourceKind::State => &["name"],
            ResourceKind::Place => &["user_id", "name"],
            ResourceKind::Review => &["user_id", "text"],
            ResourceKind::User => &["email", "password"],
        }
    }

    /// Fields an update body can never overwrite
    pub fn immutable_fields(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Amenity | ResourceKind::State => &["id", "created_at", "updated_at"],
            ResourceKind::City => &["id", "state_id", "created_at", "updated_at"],
            ResourceKind::Place => &["id", "user_id", "city_id", "created_at", "updated_at"],
            ResourceKind::Review => &["id", "user_id", "place_id", "created_at", "updated_at"],
            ResourceKind::User => &["id", "email", "created_at", "updated_at"],
        }
    }

    /// Attributes the model declares for this kind
    pub fn known_fields(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Amenity | ResourceKind::State => &["name"],
            ResourceKind::City => &["state_id", "name"],
            ResourceKind::Place => &[
                "city_id",
                "user_id",
                "name",
                "description",
                "number_rooms",
                "number_bathrooms",
                "max_guest",
                "price_by_night",
                "latitude",
                "longitude",
                "amenity_ids",
            ],
            ResourceKind::Review => &["place_id", "user_id", "text"],
            ResourceKind::User => &["email", "password", "first_name", "last_name"],
        }
    }

    pub fn is_known_field(&self, field: &str) -> bool {
        self.known_fields().contains(&field)
    }

    /// The container this kind belongs to, if any
    pub fn parent(&self) -> Option<Relation> {
        Relation::ALL.into_iter().find(|r| r.child == *self)
    }

    /// Field naming a User this kind must reference
    pub fn user_reference(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Place | ResourceKind::Review => Some("user_id"),
            _ => None,
        }
    }

    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.class_name() == name)
    }

    pub fn from_collection(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.collection() == name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// Unrecognized resource kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for ResourceKind {
    type Err = ParseKindError;

    /// Accepts either the class name or the collection name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_class_name(s)
            .or_else(|| Self::from_collection(s))
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
