//! Bulk writer for the `lexicon` relation.

use super::{ensure_empty, RepoError, RepoResult};
use crate::lexicon::LexiconSink;
use crate::model::lexicon::LexiconRecord;
use rusqlite::{params, Connection, Statement};

const INSERT_LEXICON_SQL: &str = "INSERT INTO lexicon (
    traditional,
    simplified,
    romanization,
    gloss,
    char_count
) VALUES (?1, ?2, ?3, ?4, ?5);";

/// Streams records through one prepared insert.
///
/// Meant to run on a [`rusqlite::Transaction`] so the whole lexicon becomes
/// visible at commit, or not at all.
pub struct SqliteLexiconWriter<'conn> {
    insert: Statement<'conn>,
}

impl<'conn> SqliteLexiconWriter<'conn> {
    /// Prepares the writer after checking `lexicon` is empty.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_empty(conn, "lexicon")?;
        Ok(Self {
            insert: conn.prepare(INSERT_LEXICON_SQL)?,
        })
    }
}

impl LexiconSink for SqliteLexiconWriter<'_> {
    type Error = RepoError;

    fn write_record(&mut self, record: &LexiconRecord) -> RepoResult<()> {
        self.insert.execute(params![
            record.traditional.as_str(),
            record.simplified.as_str(),
            record.romanization.as_str(),
            record.gloss.as_str(),
            record.char_count as i64,
        ])?;
        Ok(())
    }
}
