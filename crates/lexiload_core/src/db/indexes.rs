//! Lookup indices created after bulk loading.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

const INDEX_SQL: &str = "
CREATE INDEX IF NOT EXISTS lexicon_traditional_index ON lexicon(traditional);
CREATE INDEX IF NOT EXISTS lexicon_simplified_index ON lexicon(simplified);
CREATE INDEX IF NOT EXISTS entries_title_index ON entries(title);
CREATE INDEX IF NOT EXISTS entries_id_index ON entries(id);
CREATE INDEX IF NOT EXISTS variants_id_index ON variants(id);
CREATE INDEX IF NOT EXISTS senses_id_index ON senses(id);
";

/// Creates the query indices over all dictionary relations.
///
/// Intended to run after both load paths finish. Safe to call more than once.
pub fn create_indexes(conn: &Connection) -> DbResult<()> {
    let started_at = Instant::now();
    info!("event=index_create module=db status=start");

    if let Err(err) = conn.execute_batch(INDEX_SQL) {
        error!(
            "event=index_create module=db status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(DbError::Index(err));
    }

    info!(
        "event=index_create module=db status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(())
}
