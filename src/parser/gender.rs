use crate::lexicon::{Gender, PartOfSpeech};

/// Suffix rules, checked top to bottom; the first match wins.
/// New endings go here, in the position that gives them the right precedence.
pub const SUFFIX_RULES: &[(&str, Gender)] = &[
    ("a", Gender::Feminine),
    ("us", Gender::Masculine),
    ("er", Gender::Masculine),
    ("or", Gender::Masculine),
    ("um", Gender::Neuter),
];

/// Guess grammatical gender from the word ending. Only nouns and adjectives
/// get a gender; everything else, and any ending not listed, is `Unknown`.
pub fn classify(word: &str, pos: PartOfSpeech) -> Gender {
    if !pos.is_nominal() {
        return Gender::Unknown;
    }

    let w = word.trim().to_lowercase();
    SUFFIX_RULES
        .iter()
        .find(|(suffix, _)| w.ends_with(suffix))
        .map(|&(_, gender)| gender)
        .unwrap_or(Gender::Unknown)
}
