pub mod extract;
pub mod gender;
pub mod table;

use tracing::info;

use crate::error::Result;
use crate::lexicon::Taxonomy;
use table::DictionaryTable;

/// Two-step pipeline: page markup → raw records → grouped, gendered table.
pub fn process_page(html: &str, taxonomy: &Taxonomy) -> Result<DictionaryTable> {
    let extraction = extract::extract(html)?;
    info!(
        "Extracted {} records ({} items skipped)",
        extraction.records.len(),
        extraction.skipped
    );
    table::build_table(&extraction.records, taxonomy)
}
