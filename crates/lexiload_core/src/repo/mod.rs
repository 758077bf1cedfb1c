//! SQLite writers for the dictionary relations.
//!
//! # Responsibility
//! - Implement the lexicon and row sinks on top of prepared statements.
//! - Refuse to load into relations that already hold rows.
//!
//! # Invariants
//! - Every write binds parameters; no value is spliced into SQL text.
//! - Writers never open or commit transactions; callers own that boundary.

use crate::db::DbError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod entry_repo;
pub mod lexicon_repo;

pub use entry_repo::SqliteEntryWriter;
pub use lexicon_repo::SqliteLexiconWriter;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error from the SQLite writers.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Target relation already holds rows from an earlier load.
    TargetNotEmpty(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::TargetNotEmpty(table) => write!(
                f,
                "table `{table}` already contains rows; loads require a fresh database"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::TargetNotEmpty(_) => None,
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

/// Fails with [`RepoError::TargetNotEmpty`] when `table` has any row.
///
/// `table` must be one of the schema's own relation names.
pub(crate) fn ensure_empty(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table});"),
        [],
        |row| row.get(0),
    )?;
    if exists != 0 {
        return Err(RepoError::TargetNotEmpty(table));
    }
    Ok(())
}
