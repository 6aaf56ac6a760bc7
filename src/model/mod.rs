//! Resource model for hbnb
//!
//! Six resource kinds share one record shape: a server-assigned id, two
//! server-managed timestamps, and a flat map of client attributes.
//!
//! # Relationships
//!
//! - City belongs to State (`state_id`)
//! - Place belongs to City (`city_id`) and references User (`user_id`)
//! - Review belongs to Place (`place_id`) and references User (`user_id`)
//!
//! Relationships are stored only as foreign-key id fields. Children are
//! never embedded in their parent's representation.

mod kind;
mod relation;
mod resource;

pub use kind::{ParseKindError, ResourceKind};
pub use relation::Relation;
pub use resource::{Resource, ResourceDecodeError, SERVER_MANAGED_FIELDS, TIME_FORMAT};
