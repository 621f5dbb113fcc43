//! In-memory caches owned by a database session.

mod identity_map;

pub use identity_map::{Handle, IdentityMap};
