//! Parent/child relations
//!
//! A relation is data, not code: the child kind, its container kind, and
//! the child attribute holding the container's id. All three pairs share
//! one resolution path.

use super::kind::ResourceKind;
use super::resource::Resource;

/// Child kind scoped under a parent kind through a link field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub child: ResourceKind,
    pub parent: ResourceKind,
    pub link_field: &'static str,
}

impl Relation {
    pub const CITY_IN_STATE: Relation = Relation {
        child: ResourceKind::City,
        parent: ResourceKind::State,
        link_field: "state_id",
    };

    pub const PLACE_IN_CITY: Relation = Relation {
        child: ResourceKind::Place,
        parent: ResourceKind::City,
        link_field: "city_id",
    };

    pub const REVIEW_OF_PLACE: Relation = Relation {
        child: ResourceKind::Review,
        parent: ResourceKind::Place,
        link_field: "place_id",
    };

    pub const ALL: [Relation; 3] = [
        Relation::CITY_IN_STATE,
        Relation::PLACE_IN_CITY,
        Relation::REVIEW_OF_PLACE,
    ];

    /// Whether `child` is linked to the parent with `parent_id`
    pub fn links(&self, child: &Resource, parent_id: &str) -> bool {
        child.kind() == self.child && child.link(self.link_field) == Some(parent_id)
    }
}
