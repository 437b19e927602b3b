use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::lexicon::{PartOfSpeech, Taxonomy, DEFAULT_CATEGORIES};

pub const DEFAULT_URL: &str = "https://travelwithlanguages.com/blog/most-common-latin-words.html";
pub const DEFAULT_OUTPUT: &str = "dict.txt";
const ENV_PREFIX: &str = "LIPSUM";

/// Run settings: defaults, then `LIPSUM_*` environment variables.
/// CLI flags are applied on top by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub url: String,
    pub output: PathBuf,
    /// Categories kept in the table; `LIPSUM_CATEGORIES=noun,verb` narrows it.
    pub categories: Vec<PartOfSpeech>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let categories: Vec<&str> = DEFAULT_CATEGORIES.iter().map(|pos| pos.as_str()).collect();

        Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("categories", categories)?
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("categories"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn taxonomy(&self) -> Taxonomy {
        Taxonomy::new(&self.categories)
    }
}
