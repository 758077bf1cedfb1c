//! Core pipeline for loading dictionary sources into SQLite.
//!
//! Two inputs are normalized into one relational schema:
//! - a line-oriented bilingual lexicon (`TRAD SIMP [ROMANIZATION] /GLOSS/`);
//! - a nested JSON entry dump (entry -> heteronym -> definition).
//!
//! Callers open a database with [`db::open_db`], then run
//! [`service::load_files`] or drive [`LoadService`] directly.

pub mod db;
pub mod dump;
pub mod encode;
pub mod export;
pub mod lexicon;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use dump::{decode_entries, flatten, DecodeError, FlattenSummary, FlattenedDump, RowSink};
pub use lexicon::{
    ConsistencyError, LexiconError, LexiconReader, LexiconSink, MalformedLineError,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::entry::{EntryNode, EntryRow, SenseNode, SenseRow, VariantNode, VariantRow};
pub use model::lexicon::LexiconRecord;
pub use repo::RepoError;
pub use service::{
    export_files, load_files, EntryCommitPolicy, LoadError, LoadReport, LoadResult, LoadService,
    LoadSources,
};

