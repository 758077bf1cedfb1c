//! Nested entry dump input and its relational projection.
//!
//! # Responsibility
//! - Decode the JSON dump into an owned entry tree.
//! - Flatten the tree into `entries`, `variants` and `senses` rows.

pub mod decode;
pub mod flatten;

pub use decode::{decode_entries, DecodeError};
pub use flatten::{flatten, FlattenSummary, FlattenedDump, Flattener, IdSequence, RowSink};
