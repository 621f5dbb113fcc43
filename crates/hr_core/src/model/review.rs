//! Performance review record.
//!
//! # Responsibility
//! - Hold the in-memory fields of one `reviews` row.
//! - Provide pure constructors that never touch storage.
//!
//! # Invariants
//! - `id` is `None` before the first save and after a delete.
//! - `employee_id` references an employee row owned elsewhere.

use crate::cache::Handle;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Database-assigned review identifier.
pub type ReviewId = i64;

/// Shared handle to the single in-memory `Review` of a stored row.
pub type ReviewHandle = Handle<Review>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Assigned by SQLite on first insert.
    pub id: Option<ReviewId>,
    pub year: i64,
    pub summary: String,
    pub employee_id: i64,
}

impl Review {
    /// Creates a transient review with no stored row.
    pub fn new(year: i64, summary: impl Into<String>, employee_id: i64) -> Self {
        Self {
            id: None,
            year,
            summary: summary.into(),
            employee_id,
        }
    }

    /// Creates a review carrying a known id.
    ///
    /// Does not register anything in a cache; use repository hydration for
    /// rows that were read from storage.
    pub fn with_id(id: ReviewId, year: i64, summary: impl Into<String>, employee_id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::new(year, summary, employee_id)
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Review {id}: ")?,
            None => write!(f, "<Review None: ")?,
        }
        write!(
            f,
            "{}, {}, Employee: {}>",
            self.year, self.summary, self.employee_id
        )
    }
}
