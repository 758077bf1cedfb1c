//! Dictionary database: connection setup, relation creation, lookup indices.
//!
//! # Responsibility
//! - Hand out connections that already carry the `lexicon`, `entries`,
//!   `variants` and `senses` relations.
//! - Create lookup indices once both load paths have finished.
//!
//! # Invariants
//! - The created schema is stamped into `PRAGMA user_version`.
//! - A database stamped newer than this binary is refused untouched.
//! - Failures say which stage broke: open, schema step, or index build.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod indexes;
pub mod migrations;
mod open;

pub use indexes::create_indexes;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The file or in-memory database could not be opened.
    Open {
        mode: &'static str,
        source: rusqlite::Error,
    },
    /// A schema step failed; nothing from that run was kept.
    Schema {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The database was created by a newer loader.
    NewerSchema { found: u32, supported: u32 },
    /// Lookup index creation failed after loading.
    Index(rusqlite::Error),
    /// Any other statement failure.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { mode, source } => {
                write!(f, "cannot open {mode} dictionary database: {source}")
            }
            Self::Schema {
                version,
                name,
                source,
            } => write!(f, "schema step {version} ({name}) failed: {source}"),
            Self::NewerSchema { found, supported } => write!(
                f,
                "dictionary database schema {found} is newer than supported {supported}"
            ),
            Self::Index(err) => write!(f, "lookup index creation failed: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Schema { source, .. } => Some(source),
            Self::Index(err) | Self::Sqlite(err) => Some(err),
            Self::NewerSchema { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn messages_name_the_failing_stage() {
        let schema = DbError::Schema {
            version: 1,
            name: "dictionary",
            source: rusqlite::Error::InvalidQuery,
        };
        assert!(schema.to_string().starts_with("schema step 1 (dictionary) failed:"));
        assert!(schema.source().is_some());

        let index = DbError::Index(rusqlite::Error::InvalidQuery);
        assert!(index.to_string().starts_with("lookup index creation failed:"));

        let newer = DbError::NewerSchema {
            found: 7,
            supported: 1,
        };
        assert_eq!(
            newer.to_string(),
            "dictionary database schema 7 is newer than supported 1"
        );
        assert!(newer.source().is_none());
    }
}
