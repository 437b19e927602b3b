use std::fmt;

use serde::Deserialize;

/// Raw category tags rewritten before filtering: (extracted tag, category).
pub const CATEGORY_ALIASES: &[(&str, PartOfSpeech)] = &[("proper", PartOfSpeech::Noun)];

/// Categories kept when no narrower set is configured.
pub const DEFAULT_CATEGORIES: &[PartOfSpeech] = PartOfSpeech::ALL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Verb,
    Adverb,
    Preposition,
    Conjunction,
}

impl PartOfSpeech {
    /// Every category, in the order of the downstream `POS` enum.
    pub const ALL: &'static [PartOfSpeech] = &[
        PartOfSpeech::Noun,
        PartOfSpeech::Adjective,
        PartOfSpeech::Verb,
        PartOfSpeech::Adverb,
        PartOfSpeech::Preposition,
        PartOfSpeech::Conjunction,
    ];

    /// Lowercase tag as it appears in the page markup.
    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
        }
    }

    /// Enum member name used in the rendered table (`POS::NOUN`).
    pub fn enum_name(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Adjective => "ADJECTIVE",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Adverb => "ADVERB",
            PartOfSpeech::Preposition => "PREPOSITION",
            PartOfSpeech::Conjunction => "CONJUNCTION",
        }
    }

    /// Exact (case-sensitive) match against the lowercase tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|pos| pos.as_str() == tag)
    }

    /// Gender only applies to nominal categories.
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Adjective)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
    Unknown,
}

impl Gender {
    /// Single-character code written to the table.
    pub fn code(self) -> char {
        match self {
            Gender::Masculine => 'm',
            Gender::Feminine => 'f',
            Gender::Neuter => 'n',
            Gender::Unknown => 'x',
        }
    }
}

/// One list item as extracted, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub word: String,
    #[serde(rename = "rawCategory")]
    pub raw_category: String,
}

impl RawRecord {
    pub fn new(word: impl Into<String>, raw_category: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            raw_category: raw_category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    pub word: String,
    pub pos: PartOfSpeech,
    pub gender: Gender,
}

/// The allowed category set plus the alias rewrites applied before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    allowed: Vec<PartOfSpeech>,
    aliases: &'static [(&'static str, PartOfSpeech)],
}

impl Taxonomy {
    /// Build from any selection of categories. Duplicates collapse and the
    /// result is kept in `PartOfSpeech::ALL` order so rendering is stable.
    pub fn new(categories: &[PartOfSpeech]) -> Self {
        let allowed = PartOfSpeech::ALL
            .iter()
            .copied()
            .filter(|pos| categories.contains(pos))
            .collect();
        Self {
            allowed,
            aliases: CATEGORY_ALIASES,
        }
    }

    pub fn allowed(&self) -> &[PartOfSpeech] {
        &self.allowed
    }

    /// Apply aliases, returning the normalized tag. Matching is exact.
    pub fn normalize<'a>(&self, raw_category: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == raw_category)
            .map(|(_, pos)| pos.as_str())
            .unwrap_or(raw_category)
    }

    /// Normalized category if it is in the allowed set, `None` if the record
    /// must be dropped.
    pub fn resolve(&self, raw_category: &str) -> Option<PartOfSpeech> {
        PartOfSpeech::from_tag(self.normalize(raw_category))
            .filter(|pos| self.allowed.contains(pos))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}
