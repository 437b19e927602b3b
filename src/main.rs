mod error;
mod fetch;
mod lexicon;
mod output;
mod parser;
mod render;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use settings::Settings;

#[derive(Parser)]
#[command(
    name = "lipsum_dict",
    about = "Scrape common Latin words into a C++ dictionary initializer"
)]
struct Cli {
    /// Page to scrape (default: LIPSUM_URL or the travelwithlanguages word list)
    #[arg(long, conflicts_with_all = ["html", "records"])]
    url: Option<String>,
    /// Read the page from a saved HTML file instead of fetching it
    #[arg(long, value_name = "PATH", conflicts_with = "records")]
    html: Option<PathBuf>,
    /// Read pre-extracted records from a JSON file ([{"word", "rawCategory"}, ...])
    #[arg(long, value_name = "PATH")]
    records: Option<PathBuf>,
    /// Output file (default: LIPSUM_OUTPUT or dict.txt)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Print the table to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = run(cli);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {}", format_duration(elapsed));
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load().context("Invalid LIPSUM_* configuration")?;
    if let Some(url) = cli.url {
        settings.url = url;
    }
    if let Some(output) = cli.output {
        settings.output = output;
    }
    let taxonomy = settings.taxonomy();

    // Nothing is written until the whole table has been built.
    let table = if let Some(path) = &cli.records {
        let records = fetch::read_records(path).context("Error loading records")?;
        parser::table::build_table(&records, &taxonomy).context("Error building dictionary")?
    } else {
        let html = match &cli.html {
            Some(path) => fetch::read_page(path).context("Error reading page")?,
            None => fetch::fetch_page(&settings.url).context("Error fetching webpage")?,
        };
        parser::process_page(&html, &taxonomy).context("Error parsing HTML")?
    };

    let text = render::render_table(&table);

    if cli.stdout {
        print!("{}", text);
        return Ok(());
    }

    output::write_table(&settings.output, &text).context("Error writing dictionary")?;
    println!(
        "Dictionary successfully written to {} ({} words)",
        settings.output.display(),
        table.word_count()
    );
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
