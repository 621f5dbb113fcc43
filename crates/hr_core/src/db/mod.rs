//! SQLite storage bootstrap and session ownership.
//!
//! # Responsibility
//! - Open and configure SQLite connections for HR record storage.
//! - Own the per-session identity caches next to the connection.
//!
//! # Invariants
//! - Connections run in autocommit mode; every write is durable on return.
//! - Callers never touch a process-wide connection; sessions are passed in.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod session;

pub use open::{open_db, open_db_in_memory, DbOptions};
pub use session::Session;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
