use tracing::{debug, info};

use super::gender;
use crate::error::{Error, Result};
use crate::lexicon::{PartOfSpeech, RawRecord, Taxonomy, WordRecord};

/// Words grouped by part of speech. Holds one group per allowed category,
/// in taxonomy order, even when a group is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryTable {
    groups: Vec<(PartOfSpeech, Vec<WordRecord>)>,
}

impl DictionaryTable {
    fn empty(taxonomy: &Taxonomy) -> Self {
        Self {
            groups: taxonomy.allowed().iter().map(|&pos| (pos, Vec::new())).collect(),
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = (PartOfSpeech, &[WordRecord])> + '_ {
        self.groups.iter().map(|(pos, words)| (*pos, words.as_slice()))
    }

    #[cfg(test)]
    pub fn get(&self, pos: PartOfSpeech) -> Option<&[WordRecord]> {
        self.groups
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|(_, words)| words.as_slice())
    }

    /// Total number of words across all groups.
    pub fn word_count(&self) -> usize {
        self.groups.iter().map(|(_, words)| words.len()).sum()
    }

    fn push(&mut self, record: WordRecord) {
        if let Some((_, words)) = self.groups.iter_mut().find(|(p, _)| *p == record.pos) {
            words.push(record);
        }
    }
}

/// Normalize, filter, classify and group extracted records.
///
/// An empty input means the extractor found nothing usable and is an error;
/// input that is entirely filtered out yields a table of empty groups.
pub fn build_table(records: &[RawRecord], taxonomy: &Taxonomy) -> Result<DictionaryTable> {
    if records.is_empty() {
        return Err(Error::structure_not_found("any vocabulary records"));
    }

    let mut table = DictionaryTable::empty(taxonomy);
    let mut dropped = 0usize;

    for raw in records {
        let Some(pos) = taxonomy.resolve(&raw.raw_category) else {
            debug!(word = %raw.word, category = %raw.raw_category, "dropping record");
            dropped += 1;
            continue;
        };
        let gender = gender::classify(&raw.word, pos);
        table.push(WordRecord {
            word: raw.word.clone(),
            pos,
            gender,
        });
    }

    for (pos, words) in table.groups() {
        info!("{:<12} {} words", pos.as_str(), words.len());
    }
    info!(
        "Kept {} of {} records ({} dropped)",
        table.word_count(),
        records.len(),
        dropped
    );

    Ok(table)
}
