//! Depth-first flattening of the entry tree into relational rows.
//!
//! # Responsibility
//! - Walk entry -> variant -> sense in document order.
//! - Assign corpus-wide ids and parent back-references.
//! - Hand every row to a [`RowSink`] in the same order ids are assigned.
//!
//! # Invariants
//! - Each relation has its own gapless counter starting at 1, never reset
//!   per parent.
//! - `idx` restarts at 0 under every parent.
//! - Empty strings and empty lists become `None`; nothing is defaulted.

use crate::encode::{join_non_empty, non_empty};
use crate::model::entry::{
    EntryId, EntryNode, EntryRow, SenseNode, SenseRow, VariantId, VariantNode, VariantRow,
};
use std::convert::Infallible;

/// Consumer of flattened rows.
///
/// Rows arrive depth-first: an entry, then each of its variants, each
/// variant immediately followed by its senses. Parents always precede
/// children, so writers can rely on foreign keys being satisfiable.
pub trait RowSink {
    type Error;

    fn write_entry(&mut self, row: &EntryRow) -> Result<(), Self::Error>;
    fn write_variant(&mut self, row: &VariantRow) -> Result<(), Self::Error>;
    fn write_sense(&mut self, row: &SenseRow) -> Result<(), Self::Error>;
}

/// Monotonic identifier source for one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: i64,
}

impl IdSequence {
    pub fn starting_at(first: i64) -> Self {
        Self { next: first }
    }

    /// Returns the next id and advances the sequence.
    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// Row counts emitted by one flattening walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenSummary {
    pub entries: usize,
    pub variants: usize,
    pub senses: usize,
}

/// Walk state: one id sequence per relation.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    entry_ids: IdSequence,
    variant_ids: IdSequence,
    sense_ids: IdSequence,
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens `entries` into `sink`.
    ///
    /// Stops at the first sink error; rows already handed over stay with
    /// the sink.
    pub fn run<S: RowSink>(
        &mut self,
        entries: &[EntryNode],
        sink: &mut S,
    ) -> Result<FlattenSummary, S::Error> {
        let mut summary = FlattenSummary::default();

        for entry in entries {
            let entry_id = self.entry_ids.next_id();
            sink.write_entry(&entry_row(entry_id, entry))?;
            summary.entries += 1;

            for (idx, variant) in entry.variants.iter().enumerate() {
                let variant_row = self.variant_row(entry_id, idx, variant);
                sink.write_variant(&variant_row)?;
                summary.variants += 1;

                for (idx, sense) in variant.senses.iter().enumerate() {
                    let sense_row = self.sense_row(variant_row.id, idx, sense);
                    sink.write_sense(&sense_row)?;
                    summary.senses += 1;
                }
            }
        }

        Ok(summary)
    }

    fn variant_row(&mut self, entry_id: EntryId, idx: usize, variant: &VariantNode) -> VariantRow {
        VariantRow {
            id: self.variant_ids.next_id(),
            entry_id,
            idx,
            pinyin: present(&variant.pinyin),
            bopomofo: present(&variant.bopomofo),
            bopomofo2: present(&variant.bopomofo2),
        }
    }

    fn sense_row(&mut self, variant_id: VariantId, idx: usize, sense: &SenseNode) -> SenseRow {
        SenseRow {
            id: self.sense_ids.next_id(),
            variant_id,
            idx,
            definition: present(&sense.definition),
            quotes: join_non_empty(&sense.quotes),
            examples: join_non_empty(&sense.examples),
            kind: present(&sense.kind),
            links: join_non_empty(&sense.links),
            synonyms: present(&sense.synonyms),
            antonyms: present(&sense.antonyms),
        }
    }
}

fn entry_row(id: EntryId, entry: &EntryNode) -> EntryRow {
    EntryRow {
        id,
        title: entry.title.clone(),
        radical: present(&entry.radical),
        stroke_count: entry.stroke_count,
        non_radical_stroke_count: entry.non_radical_stroke_count,
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(non_empty).map(str::to_owned)
}

/// The three relations of one dump, each in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedDump {
    pub entries: Vec<EntryRow>,
    pub variants: Vec<VariantRow>,
    pub senses: Vec<SenseRow>,
}

impl RowSink for FlattenedDump {
    type Error = Infallible;

    fn write_entry(&mut self, row: &EntryRow) -> Result<(), Self::Error> {
        self.entries.push(row.clone());
        Ok(())
    }

    fn write_variant(&mut self, row: &VariantRow) -> Result<(), Self::Error> {
        self.variants.push(row.clone());
        Ok(())
    }

    fn write_sense(&mut self, row: &SenseRow) -> Result<(), Self::Error> {
        self.senses.push(row.clone());
        Ok(())
    }
}

/// Flattens a whole dump into memory.
pub fn flatten(entries: &[EntryNode]) -> FlattenedDump {
    let mut dump = FlattenedDump::default();
    match Flattener::new().run(entries, &mut dump) {
        Ok(_) => dump,
        Err(never) => match never {},
    }
}
