use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {url}: server returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not find {container} in the page")]
    StructureNotFound { container: String },

    #[error("malformed list markup")]
    Markup(#[from] quick_xml::Error),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid records file")]
    Records(#[from] serde_json::Error),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn structure_not_found(container: impl Into<String>) -> Self {
        Error::StructureNotFound {
            container: container.into(),
        }
    }
}
