use std::path::Path;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::{Error, Result};
use crate::lexicon::RawRecord;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

/// Download the page at `url` and return its body as text.
///
/// Transport failures and non-success statuses both abort; there is no retry.
pub fn fetch_page(url: &str) -> Result<String> {
    let fetch_err = |source| Error::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(TIMEOUT)
        .build()
        .map_err(fetch_err)?;

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching {}", url));
    pb.enable_steady_tick(Duration::from_millis(100));

    info!("Fetching page: {}", url);
    let start = Instant::now();
    let result = client.get(url).send();
    pb.finish_and_clear();

    let response = result.map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().map_err(fetch_err)?;
    info!(
        "Fetched {} bytes in {}ms",
        body.len(),
        start.elapsed().as_millis()
    );
    Ok(body)
}

/// Read a saved copy of the page instead of fetching it.
pub fn read_page(path: &Path) -> Result<String> {
    info!("Reading page from {}", path.display());
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load already-extracted records from a JSON array of
/// `{"word": ..., "rawCategory": ...}` objects.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let text = read_page(path)?;
    let records: Vec<RawRecord> = serde_json::from_str(&text)?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
