//! Per-entity query functions - the CRUD contract of the storage layer.
//! Every function takes the shared pool and propagates `sqlx::Error`
//! untouched; classification happens at the HTTP boundary.

pub mod blogs;
pub mod certifications;
pub mod comments;
pub mod courses;
pub mod education;
pub mod projects;
pub mod purchases;
pub mod subscribers;
pub mod tags;
pub mod users;
