//! hbnb - JSON REST API over a hierarchical resource model
//!
//! State → City → Place → Review, plus Amenity and User, each exposed
//! through the same create/read/update/delete contract under `/api/v1`.

pub mod api;
pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod storage;
