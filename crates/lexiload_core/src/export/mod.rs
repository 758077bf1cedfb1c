//! Textual SQL output of a load.
//!
//! # Responsibility
//! - Render lexicon records and flattened rows as literal `INSERT`
//!   statements for replay through any SQL shell.
//!
//! # Invariants
//! - Every value goes through [`crate::encode::encode_literal`].
//! - Statement order equals the order rows reach the SQLite writers.

pub mod sql_script;

pub use sql_script::SqlScriptWriter;
