//! Entry-dump tree model and its relational projection.
//!
//! # Responsibility
//! - Mirror the nested JSON dump: entry -> heteronym -> definition.
//! - Define the row shapes stored in `entries`, `variants` and `senses`.
//!
//! # Invariants
//! - Row ids are corpus-wide and assigned in document order.
//! - `idx` is the 0-based position under the immediate parent.

use serde::{Deserialize, Deserializer};

/// Identifier of a row in `entries`.
pub type EntryId = i64;
/// Identifier of a row in `variants`.
pub type VariantId = i64;
/// Identifier of a row in `senses`.
pub type SenseId = i64;

/// One headword in the nested dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntryNode {
    /// Unique key of the entry.
    pub title: String,
    #[serde(default)]
    pub radical: Option<String>,
    /// Missing in the dump for multi-character words; decodes as 0.
    #[serde(default)]
    pub stroke_count: i64,
    #[serde(default)]
    pub non_radical_stroke_count: i64,
    /// Pronunciation readings, in document order.
    #[serde(default, rename = "heteronyms", deserialize_with = "null_as_empty")]
    pub variants: Vec<VariantNode>,
}

/// One pronunciation reading of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VariantNode {
    #[serde(default)]
    pub pinyin: Option<String>,
    #[serde(default)]
    pub bopomofo: Option<String>,
    /// Secondary bopomofo reading.
    #[serde(default)]
    pub bopomofo2: Option<String>,
    #[serde(default, rename = "definitions", deserialize_with = "null_as_empty")]
    pub senses: Vec<SenseNode>,
}

/// One definition under a reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SenseNode {
    #[serde(default, rename = "def")]
    pub definition: Option<String>,
    #[serde(default, rename = "quote", deserialize_with = "null_as_empty")]
    pub quotes: Vec<String>,
    #[serde(default, rename = "example", deserialize_with = "null_as_empty")]
    pub examples: Vec<String>,
    /// Part-of-speech style tag. Serialized as `type`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, rename = "link", deserialize_with = "null_as_empty")]
    pub links: Vec<String>,
    #[serde(default)]
    pub synonyms: Option<String>,
    #[serde(default)]
    pub antonyms: Option<String>,
}

/// Reads a list field where JSON `null` means "no elements".
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Row of the `entries` relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub id: EntryId,
    pub title: String,
    pub radical: Option<String>,
    pub stroke_count: i64,
    pub non_radical_stroke_count: i64,
}

/// Row of the `variants` relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRow {
    pub id: VariantId,
    pub entry_id: EntryId,
    pub idx: usize,
    pub pinyin: Option<String>,
    pub bopomofo: Option<String>,
    pub bopomofo2: Option<String>,
}

/// Row of the `senses` relation.
///
/// List-valued fields are already joined with
/// [`crate::encode::LIST_DELIMITER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenseRow {
    pub id: SenseId,
    pub variant_id: VariantId,
    pub idx: usize,
    pub definition: Option<String>,
    pub quotes: Option<String>,
    pub examples: Option<String>,
    pub kind: Option<String>,
    pub links: Option<String>,
    pub synonyms: Option<String>,
    pub antonyms: Option<String>,
}
