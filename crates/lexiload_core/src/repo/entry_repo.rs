//! Row writer for the `entries`, `variants` and `senses` relations.

use super::{ensure_empty, RepoError, RepoResult};
use crate::dump::RowSink;
use crate::model::entry::{EntryRow, SenseRow, VariantRow};
use rusqlite::{params, Connection, Statement};

const INSERT_ENTRY_SQL: &str = "INSERT INTO entries (
    id,
    title,
    radical,
    stroke_count,
    non_radical_stroke_count
) VALUES (?1, ?2, ?3, ?4, ?5);";

const INSERT_VARIANT_SQL: &str = "INSERT INTO variants (
    id,
    entry_id,
    idx,
    pinyin,
    bopomofo,
    bopomofo2
) VALUES (?1, ?2, ?3, ?4, ?5, ?6);";

const INSERT_SENSE_SQL: &str = "INSERT INTO senses (
    id,
    variant_id,
    idx,
    definition,
    quotes,
    examples,
    type,
    links,
    synonyms,
    antonyms
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);";

/// Inserts one statement per flattened row, ids taken from the row.
///
/// On a plain connection every insert autocommits on its own; on a
/// transaction nothing is visible until the caller commits.
pub struct SqliteEntryWriter<'conn> {
    insert_entry: Statement<'conn>,
    insert_variant: Statement<'conn>,
    insert_sense: Statement<'conn>,
}

impl<'conn> SqliteEntryWriter<'conn> {
    /// Prepares the writer after checking the three relations are empty.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in ["entries", "variants", "senses"] {
            ensure_empty(conn, table)?;
        }
        Ok(Self {
            insert_entry: conn.prepare(INSERT_ENTRY_SQL)?,
            insert_variant: conn.prepare(INSERT_VARIANT_SQL)?,
            insert_sense: conn.prepare(INSERT_SENSE_SQL)?,
        })
    }
}

impl RowSink for SqliteEntryWriter<'_> {
    type Error = RepoError;

    fn write_entry(&mut self, row: &EntryRow) -> RepoResult<()> {
        self.insert_entry.execute(params![
            row.id,
            row.title.as_str(),
            row.radical.as_deref(),
            row.stroke_count,
            row.non_radical_stroke_count,
        ])?;
        Ok(())
    }

    fn write_variant(&mut self, row: &VariantRow) -> RepoResult<()> {
        self.insert_variant.execute(params![
            row.id,
            row.entry_id,
            row.idx as i64,
            row.pinyin.as_deref(),
            row.bopomofo.as_deref(),
            row.bopomofo2.as_deref(),
        ])?;
        Ok(())
    }

    fn write_sense(&mut self, row: &SenseRow) -> RepoResult<()> {
        self.insert_sense.execute(params![
            row.id,
            row.variant_id,
            row.idx as i64,
            row.definition.as_deref(),
            row.quotes.as_deref(),
            row.examples.as_deref(),
            row.kind.as_deref(),
            row.links.as_deref(),
            row.synonyms.as_deref(),
            row.antonyms.as_deref(),
        ])?;
        Ok(())
    }
}
