//! Repository layer: SQL mapping for HR records.
//!
//! # Responsibility
//! - Keep SQL text and row parsing inside the persistence boundary.
//! - Route every loaded row through the session identity cache.
//!
//! # Invariants
//! - Database errors are wrapped, never reinterpreted as domain outcomes.
//! - Writes against ids with no row report a zero count instead of failing.

pub mod review_repo;
