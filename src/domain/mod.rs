//! Domain aggregates exposed by the search layer.

pub mod member;
pub mod search;
pub mod team;
pub mod types;
