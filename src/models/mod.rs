//! Database models backing the member search repository.

pub mod config;
pub mod member;
pub mod team;
