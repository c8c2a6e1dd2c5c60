//! Dynamic member search over a members/teams SQLite schema.
//!
//! Optional search fields compose into a conjunctive [`filter::MemberFilter`],
//! the Diesel repository applies it to `members LEFT JOIN teams`, and
//! [`pagination::assemble`] wraps a page of results, issuing the count query
//! only when the page content cannot determine the total.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod filter;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
