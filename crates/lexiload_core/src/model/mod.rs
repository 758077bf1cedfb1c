//! Dictionary domain model.
//!
//! # Responsibility
//! - Define the lexicon record produced by the line grammar.
//! - Define the nested entry tree decoded from the JSON dump.
//! - Define the flat relational rows emitted by the flattener.
//!
//! # Invariants
//! - Records and rows are transient: produced, written, dropped.
//! - Absent values are `None`, never placeholder text.

pub mod entry;
pub mod lexicon;
