use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::lexicon::RawRecord;

/// Container holding the word list, as named in error messages.
pub const LIST_CONTAINER: &str = "<ol id=\"main-list\">";
/// Class of the element carrying the word inside each list item.
pub const WORD_CLASS: &str = "vocab";
/// Category used for items without a class.
pub const UNKNOWN_CATEGORY: &str = "unknown";

static LIST_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<ol\b[^>]*?\bid\s*=\s*(?:"main-list"|'main-list'|main-list[\s/>])"#).unwrap()
});

/// Records pulled from the list, plus how many items had to be skipped.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<RawRecord>,
    pub skipped: usize,
}

/// One open `<li>`; `slot` keeps records in document order when items nest.
struct Item {
    slot: usize,
    list_depth: usize,
    category: String,
    word: Option<String>,
    div_depth: usize,
}

impl Item {
    fn in_word(&self) -> bool {
        self.div_depth > 0
    }
}

/// Pull (word, category) pairs out of the vocabulary list in `html`.
///
/// Fails only when the list container is missing or its markup cannot be
/// tokenized. Items without a word element are logged and skipped.
pub fn extract(html: &str) -> Result<Extraction> {
    let start = LIST_OPEN_RE
        .find(html)
        .ok_or_else(|| Error::structure_not_found(LIST_CONTAINER))?
        .start();

    let mut reader = Reader::from_str(&html[start..]);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut slots: Vec<Option<RawRecord>> = Vec::new();
    let mut open: Vec<Item> = Vec::new();
    let mut list_depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match tag_name(&e).as_str() {
                "ol" | "ul" => list_depth += 1,
                "li" if list_depth > 0 => {
                    // An unclosed sibling <li> ends where the next one starts.
                    if open.last().is_some_and(|item| item.list_depth == list_depth) {
                        if let Some(item) = open.pop() {
                            finish(item, &mut slots);
                        }
                    }
                    open.push(Item {
                        slot: slots.len(),
                        list_depth,
                        category: first_class(&e)?.unwrap_or_else(|| UNKNOWN_CATEGORY.into()),
                        word: None,
                        div_depth: 0,
                    });
                    slots.push(None);
                }
                "div" => {
                    if let Some(item) = open.last_mut() {
                        if item.in_word() {
                            item.div_depth += 1;
                        } else if item.word.is_none() && has_class(&e, WORD_CLASS)? {
                            item.word = Some(String::new());
                            item.div_depth = 1;
                        }
                    }
                }
                _ => {}
            },
            // <div class="vocab"/> is a word element with no text.
            Event::Empty(e) if tag_name(&e) == "div" => {
                if let Some(item) = open.last_mut() {
                    if !item.in_word() && item.word.is_none() && has_class(&e, WORD_CLASS)? {
                        item.word = Some(String::new());
                    }
                }
            }
            Event::Text(e) => {
                if let Some(item) = open.last_mut().filter(|item| item.in_word()) {
                    // Stray '&' or unknown entities are kept as written.
                    let text = e.unescape_with(resolve_html5_entity).unwrap_or_else(|err| {
                        warn!(item = item.slot + 1, "Keeping raw word text: {}", err);
                        Cow::Owned(String::from_utf8_lossy(&e).into_owned())
                    });
                    if let Some(word) = item.word.as_mut() {
                        word.push_str(text.trim());
                    }
                }
            }
            Event::End(e) => match local_lower(e.local_name().as_ref()).as_str() {
                "ol" | "ul" if list_depth > 0 => {
                    while open.last().is_some_and(|item| item.list_depth >= list_depth) {
                        if let Some(item) = open.pop() {
                            finish(item, &mut slots);
                        }
                    }
                    list_depth -= 1;
                    if list_depth == 0 {
                        break;
                    }
                }
                "li" => {
                    if let Some(item) = open.pop() {
                        finish(item, &mut slots);
                    }
                }
                "div" => {
                    if let Some(item) = open.last_mut().filter(|item| item.in_word()) {
                        item.div_depth -= 1;
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    // Unterminated document: whatever is still open ends here.
    while let Some(item) = open.pop() {
        finish(item, &mut slots);
    }

    let total = slots.len();
    let records: Vec<RawRecord> = slots.into_iter().flatten().collect();
    let skipped = total - records.len();
    debug!("Extracted {} records from {} list items", records.len(), total);

    Ok(Extraction { records, skipped })
}

fn finish(item: Item, slots: &mut [Option<RawRecord>]) {
    match item.word {
        Some(word) => slots[item.slot] = Some(RawRecord::new(word, item.category)),
        None => warn!(
            item = item.slot + 1,
            category = %item.category,
            "No <div class='{}'> in list item, skipping",
            WORD_CLASS
        ),
    }
}

fn tag_name(e: &BytesStart) -> String {
    local_lower(e.local_name().as_ref())
}

fn local_lower(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_ascii_lowercase()
}

fn class_attr(e: &BytesStart) -> Result<Option<String>> {
    for attr in e.html_attributes().with_checks(false) {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref().eq_ignore_ascii_case(b"class") {
            let value = match attr.unescape_value_with(resolve_html5_entity) {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn first_class(e: &BytesStart) -> Result<Option<String>> {
    Ok(class_attr(e)?.and_then(|classes| classes.split_whitespace().next().map(str::to_string)))
}

fn has_class(e: &BytesStart, class: &str) -> Result<bool> {
    Ok(class_attr(e)?.is_some_and(|classes| classes.split_whitespace().any(|c| c == class)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    fn pairs(ex: &Extraction) -> Vec<(&str, &str)> {
        ex.records
            .iter()
            .map(|r| (r.word.as_str(), r.raw_category.as_str()))
            .collect()
    }

    #[test]
    fn missing_container() {
        let err = extract("<html><body><ol id=\"other\"><li>x</li></ol></body></html>").unwrap_err();
        assert!(matches!(err, Error::StructureNotFound { .. }));
    }

    #[test]
    fn similar_id_is_not_the_container() {
        let err = extract("<ol id=\"main-list-2\"><li class=\"noun\"><div class=\"vocab\">aqua</div></li></ol>")
            .unwrap_err();
        assert!(matches!(err, Error::StructureNotFound { .. }));
    }

    #[test]
    fn simple_list() {
        let html = r#"<ol id="main-list">
            <li class="noun"><div class="vocab">aqua</div><div class="meaning">water</div></li>
            <li class="adverb extra"><div class="vocab"> celeriter </div></li>
        </ol>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("aqua", "noun"), ("celeriter", "adverb")]);
        assert_eq!(ex.skipped, 0);
    }

    #[test]
    fn item_without_class_is_unknown() {
        let html = r#"<ol id="main-list"><li><div class="vocab">ecce</div></li></ol>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("ecce", "unknown")]);
    }

    #[test]
    fn item_without_word_is_skipped() {
        let html = r#"<ol id="main-list">
            <li class="noun"><span>no word here</span></li>
            <li class="verb"><div class="vocab">esse</div></li>
        </ol>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("esse", "verb")]);
        assert_eq!(ex.skipped, 1);
    }

    #[test]
    fn text_fragments_are_joined() {
        let html = r#"<ol id='main-list'><li class="noun"><div class="vocab">
            <b>ro</b>
            sa&nbsp;</div></li></ol>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("rosa", "noun")]);
    }

    #[test]
    fn unclosed_items_and_void_tags() {
        let html = r#"<OL class="words" ID=main-list>
            <li class=noun><div class="vocab">puella</div><br>
            <li class=verb><div class="vocab">amare</div>
        </OL><p>after</p>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("puella", "noun"), ("amare", "verb")]);
    }

    #[test]
    fn stops_at_container_end() {
        let html = r#"<ol id="main-list"><li class="noun"><div class="vocab">aqua</div></li></ol>
            <ol><li class="verb"><div class="vocab">esse</div></li></ol>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("aqua", "noun")]);
    }

    #[test]
    fn bare_ampersand_kept_in_word() {
        let html = r#"<ol id="main-list"><li class="conjunction"><div class="vocab">et & atque</div></li><li class="noun"><div class="vocab">aqua</div></li></ol>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("et & atque", "conjunction"), ("aqua", "noun")]);
    }

    #[test]
    fn unknown_entity_kept_in_word() {
        let html = r#"<ol id="main-list"><li class="noun"><div class="vocab">aqua&foo;</div></li><li class="verb"><div class="vocab">esse</div></li></ol>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("aqua&foo;", "noun"), ("esse", "verb")]);
        assert_eq!(ex.skipped, 0);
    }

    #[test]
    fn self_closing_word_div_is_empty_word() {
        let html = r#"<ol id="main-list"><li class="noun"><div class="vocab"/></li><li class="verb"><div class="vocab">esse</div></li></ol>"#;
        let ex = extract(html).unwrap();
        assert_eq!(pairs(&ex), [("", "noun"), ("esse", "verb")]);
        assert_eq!(ex.skipped, 0);
    }

    #[test]
    fn empty_container() {
        let ex = extract(r#"<ol id="main-list"></ol>"#).unwrap();
        assert!(ex.records.is_empty());
    }

    #[test]
    fn latin_words_fixture() {
        let ex = extract(&fixture("latin_words")).unwrap();
        assert_eq!(
            pairs(&ex),
            [
                ("et", "conjunction"),
                ("in", "preposition"),
                ("esse", "verb"),
                ("ego", "pronoun"),
                ("Roma", "proper"),
                ("magnus", "adjective"),
                ("bellum", "noun"),
                ("aqua", "noun"),
                ("celeriter", "adverb"),
                ("ecce", "unknown"),
                ("puer", "noun"),
            ]
        );
        assert_eq!(ex.skipped, 1);
    }
}
