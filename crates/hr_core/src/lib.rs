//! Core storage logic for the HR records application.
//! Maps `Review` records onto the `reviews` table with a per-session identity cache.

pub mod cache;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use cache::{Handle, IdentityMap};
pub use config::{ConfigError, CoreConfig};
pub use db::{DbError, DbOptions, DbResult, Session};
pub use logging::{init_from_config, init_logging, logging_status, LoggingStatus};
pub use model::review::{Review, ReviewHandle, ReviewId};
pub use repo::review_repo::{
    RepoError, RepoResult, ReviewRepository, ReviewRow, SqliteReviewRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
