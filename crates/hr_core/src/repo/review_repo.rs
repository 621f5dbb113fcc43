//! Review repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Manage the `reviews` table lifecycle (create/drop).
//! - Map `Review` objects to rows and back, through the session cache.
//!
//! # Invariants
//! - A stored id has at most one live `ReviewHandle` per session.
//! - `delete` evicts the cache entry and resets the object's `id` to `None`.
//! - `update`/`delete` of a missing row return `Ok(0)`.
//! - Ids are never reused while the table exists (`AUTOINCREMENT`).

use crate::db::{DbError, Session};
use crate::model::review::{Review, ReviewHandle, ReviewId};
use log::{debug, warn};
use rusqlite::{params, Row};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const CREATE_REVIEWS_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year INT,
    summary TEXT,
    employee_id INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employee(id)
);";

const DROP_REVIEWS_SQL: &str = "DROP TABLE IF EXISTS reviews;";

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    year,
    summary,
    employee_id
FROM reviews";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for review persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted review data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw `reviews` row as stored: `(id, year, summary, employee_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: ReviewId,
    pub year: i64,
    pub summary: String,
    pub employee_id: i64,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review::with_id(row.id, row.year, row.summary, row.employee_id)
    }
}

/// Repository interface for review records.
pub trait ReviewRepository {
    /// Ensures the `reviews` table exists. Safe to call repeatedly.
    fn create_table(&self) -> RepoResult<()>;

    /// Removes the `reviews` table if present. Safe to call repeatedly.
    fn drop_table(&self) -> RepoResult<()>;

    /// Inserts a transient review or updates a stored one.
    ///
    /// Returns the number of rows written.
    fn save(&self, review: &ReviewHandle) -> RepoResult<usize>;

    /// Overwrites the row matching the review's id; `Ok(0)` when none matches.
    fn update(&self, review: &ReviewHandle) -> RepoResult<usize>;

    /// Deletes the row, evicts the cache entry and clears the review's id.
    fn delete(&self, review: &ReviewHandle) -> RepoResult<usize>;

    /// Returns the cached object for `row.id`, or caches a new one.
    fn hydrate(&self, row: ReviewRow) -> ReviewHandle;

    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<ReviewHandle>>;

    /// Loads every stored review in table order.
    fn get_all(&self) -> RepoResult<Vec<ReviewHandle>>;

    /// Constructs a review and saves it in one step.
    fn create(&self, year: i64, summary: &str, employee_id: i64) -> RepoResult<ReviewHandle> {
        let review = Rc::new(RefCell::new(Review::new(year, summary, employee_id)));
        self.save(&review)?;
        Ok(review)
    }
}

/// SQLite-backed review repository bound to one session.
pub struct SqliteReviewRepository<'s> {
    session: &'s Session,
}

impl<'s> SqliteReviewRepository<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self { session }
    }

    fn insert(&self, review: &ReviewHandle) -> RepoResult<usize> {
        let changed = {
            let record = review.borrow();
            self.session.conn().execute(
                "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                params![record.year, record.summary.as_str(), record.employee_id],
            )?
        };

        let id = self.session.conn().last_insert_rowid();
        review.borrow_mut().id = Some(id);
        if self.session.reviews().insert(id, review).is_some() {
            warn!("event=review_insert module=repo status=replaced_cache_entry id={id}");
        }

        debug!("event=review_insert module=repo status=ok id={id}");
        Ok(changed)
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.session.conn().execute_batch(CREATE_REVIEWS_SQL)?;
        debug!("event=review_table_create module=repo status=ok");
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.session.conn().execute_batch(DROP_REVIEWS_SQL)?;
        debug!("event=review_table_drop module=repo status=ok");
        Ok(())
    }

    fn save(&self, review: &ReviewHandle) -> RepoResult<usize> {
        let persisted = review.borrow().is_persisted();
        if persisted {
            self.update(review)
        } else {
            self.insert(review)
        }
    }

    fn update(&self, review: &ReviewHandle) -> RepoResult<usize> {
        let record = review.borrow();
        let changed = self.session.conn().execute(
            "UPDATE reviews
             SET
                year = ?1,
                summary = ?2,
                employee_id = ?3
             WHERE id = ?4;",
            params![
                record.year,
                record.summary.as_str(),
                record.employee_id,
                record.id,
            ],
        )?;

        if changed == 0 {
            warn!(
                "event=review_update module=repo status=no_rows id={:?}",
                record.id
            );
        } else {
            debug!(
                "event=review_update module=repo status=ok id={:?} rows={changed}",
                record.id
            );
        }
        Ok(changed)
    }

    fn delete(&self, review: &ReviewHandle) -> RepoResult<usize> {
        let id = review.borrow().id;
        let changed = self
            .session
            .conn()
            .execute("DELETE FROM reviews WHERE id = ?1;", params![id])?;

        if let Some(id) = id {
            self.session.reviews().evict(id);
        }
        review.borrow_mut().id = None;

        if changed == 0 {
            warn!("event=review_delete module=repo status=no_rows id={id:?}");
        } else {
            debug!("event=review_delete module=repo status=ok id={id:?} rows={changed}");
        }
        Ok(changed)
    }

    fn hydrate(&self, row: ReviewRow) -> ReviewHandle {
        let id = row.id;
        if let Some(cached) = self.session.reviews().get(id) {
            return cached;
        }

        let review = Rc::new(RefCell::new(Review::from(row)));
        self.session.reviews().register(id, &review)
    }

    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        let mut stmt = self
            .session
            .conn()
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            let parsed = parse_review_row(row)?;
            return Ok(Some(self.hydrate(parsed)));
        }

        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<ReviewHandle>> {
        let mut stmt = self
            .session
            .conn()
            .prepare(&format!("{REVIEW_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut parsed = Vec::new();

        while let Some(row) = rows.next()? {
            parsed.push(parse_review_row(row)?);
        }

        Ok(parsed.into_iter().map(|row| self.hydrate(row)).collect())
    }
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<ReviewRow> {
    let id: ReviewId = row.get("id")?;
    Ok(ReviewRow {
        id,
        year: required_column(row, "year", id)?,
        summary: required_column(row, "summary", id)?,
        employee_id: required_column(row, "employee_id", id)?,
    })
}

fn required_column<T: rusqlite::types::FromSql>(
    row: &Row<'_>,
    column: &str,
    id: ReviewId,
) -> RepoResult<T> {
    row.get::<_, Option<T>>(column)?.ok_or_else(|| {
        RepoError::InvalidData(format!("NULL value in reviews.{column} for id {id}"))
    })
}
