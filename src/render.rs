use crate::lexicon::WordRecord;
use crate::parser::table::DictionaryTable;

/// Render the table as C++ initializer blocks, one per category:
///
/// ```text
/// dict[POS::NOUN] = {
///     {"aqua", POS::NOUN, 'f' },
/// };
/// ```
///
/// Blocks are separated by a blank line; empty categories still get a block.
pub fn render_table(table: &DictionaryTable) -> String {
    let mut lines = Vec::new();

    for (pos, words) in table.groups() {
        let name = pos.enum_name();
        lines.push(format!("dict[POS::{}] = {{", name));
        lines.extend(words.iter().map(|w| render_entry(w, name)));
        lines.push("};\n".to_string());
    }

    lines.join("\n")
}

fn render_entry(word: &WordRecord, pos_name: &str) -> String {
    format!(
        "    {{\"{}\", POS::{}, '{}' }},",
        escape_literal(&word.word),
        pos_name,
        word.gender.code()
    )
}

/// Keep the word a valid C++ string literal.
fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{RawRecord, Taxonomy};
    use crate::parser::table::build_table;

    fn render(pairs: &[(&str, &str)]) -> String {
        let raw: Vec<RawRecord> = pairs.iter().map(|(w, c)| RawRecord::new(*w, *c)).collect();
        render_table(&build_table(&raw, &Taxonomy::default()).unwrap())
    }

    #[test]
    fn aqua_line() {
        let out = render(&[("aqua", "noun")]);
        assert!(out.contains("dict[POS::NOUN] = {\n    {\"aqua\", POS::NOUN, 'f' },\n};\n"));
    }

    #[test]
    fn dominus_via_proper() {
        let out = render(&[("dominus", "proper")]);
        assert!(out.contains("    {\"dominus\", POS::NOUN, 'm' },"));
    }

    #[test]
    fn adverb_gets_x() {
        let out = render(&[("celeriter", "adverb")]);
        assert!(out.contains("    {\"celeriter\", POS::ADVERB, 'x' },"));
    }

    #[test]
    fn pronoun_absent() {
        let out = render(&[("ego", "pronoun"), ("esse", "verb")]);
        assert!(!out.contains("ego"));
        assert!(out.contains("{\"esse\", POS::VERB, 'x' },"));
    }

    #[test]
    fn every_category_has_a_block() {
        let out = render(&[("aqua", "noun")]);
        let expected = "\
dict[POS::NOUN] = {
    {\"aqua\", POS::NOUN, 'f' },
};

dict[POS::ADJECTIVE] = {
};

dict[POS::VERB] = {
};

dict[POS::ADVERB] = {
};

dict[POS::PREPOSITION] = {
};

dict[POS::CONJUNCTION] = {
};
";
        assert_eq!(out, expected);
    }

    #[test]
    fn deterministic() {
        let input = [("rosa", "noun"), ("et", "conjunction"), ("bonus", "adjective")];
        assert_eq!(render(&input), render(&input));
    }

    #[test]
    fn quotes_escaped() {
        let out = render(&[("a\"b\\c", "noun")]);
        assert!(out.contains(r#"{"a\"b\\c", POS::NOUN, 'x' },"#));
    }
}
