//! Domain records for the HR application.
//!
//! # Invariants
//! - A record's `id` is `None` exactly when it has no stored row.
//! - Foreign keys to other HR entities are carried as raw ids, not validated.

pub mod review;
