//! Database session: one connection plus the identity caches bound to it.
//!
//! # Responsibility
//! - Scope a connection's lifetime (open, use, close).
//! - Own the identity cache so repeated loads within a session share objects.
//!
//! # Invariants
//! - A cache never outlives the connection its entries were loaded from.
//! - Sessions are single-threaded (`!Send`), matching blocking SQLite use.

use super::{open_db, open_db_in_memory, DbOptions, DbResult};
use crate::cache::IdentityMap;
use crate::config::CoreConfig;
use crate::model::review::Review;
use log::{debug, info};
use rusqlite::Connection;
use std::path::Path;

pub struct Session {
    conn: Connection,
    reviews: IdentityMap<Review>,
}

impl Session {
    /// Wraps an already configured connection with empty caches.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            reviews: IdentityMap::new(),
        }
    }

    /// Opens a file-backed session.
    pub fn open(path: impl AsRef<Path>, options: &DbOptions) -> DbResult<Self> {
        Ok(Self::new(open_db(path, options)?))
    }

    /// Opens a session over a private in-memory database.
    pub fn open_in_memory(options: &DbOptions) -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory(options)?))
    }

    /// Opens the database described by `config` (in-memory when no path is set).
    pub fn from_config(config: &CoreConfig) -> DbResult<Self> {
        let options = DbOptions::from(config);
        match config.db_path.as_deref() {
            Some(path) => Self::open(path, &options),
            None => Self::open_in_memory(&options),
        }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Identity cache for `Review` records loaded through this session.
    pub fn reviews(&self) -> &IdentityMap<Review> {
        &self.reviews
    }

    /// Drops cached objects and closes the connection, reporting close errors.
    pub fn close(self) -> DbResult<()> {
        let cached = self.reviews.ids();
        debug!("event=db_close module=db status=start cached_ids={cached:?}");
        self.reviews.clear();
        self.conn.close().map_err(|(_, err)| err)?;
        info!("event=db_close module=db status=ok cached_reviews={}", cached.len());
        Ok(())
    }
}
