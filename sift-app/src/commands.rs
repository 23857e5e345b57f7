use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use sift_config::SiftConfig;
use sift_serp::filter::filter_results;
use sift_serp::{ClickTargetExtractor, ResultExtractor, SearchOptions, build_search_url};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use crate::cli::{ClickArgs, Command, ParseArgs, UrlArgs};

/// How a command finished when it did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The command ran but had nothing to print.
    NotFound,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::NotFound => ExitCode::FAILURE,
        }
    }
}

pub fn run(command: Command, cfg: &SiftConfig) -> Result<Outcome> {
    match command {
        Command::Parse(args) => parse(args, cfg),
        Command::Url(args) => url(args, cfg),
        Command::Click(args) => click(args, cfg),
    }
}

fn parse(args: ParseArgs, cfg: &SiftConfig) -> Result<Outcome> {
    let html = read_lossy(&args.html_path)?;
    let extractor = ResultExtractor::new(&cfg.selectors)
        .context("invalid result selectors in configuration")?;

    let now = Local::now().naive_local();
    let rows = extractor.extract(&html, now);
    let extracted = rows.len();

    let filters = cfg.filters.clone().merge(args.filters());
    let rows = filter_results(rows, &filters);
    tracing::info!(
        path = %args.html_path.display(),
        extracted,
        kept = rows.len(),
        "parsed results page"
    );

    match args.out.as_deref() {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_json(BufWriter::new(file), &rows)?;
        }
        None => write_json(io::stdout().lock(), &rows)?,
    }
    Ok(Outcome::Done)
}

fn url(args: UrlArgs, cfg: &SiftConfig) -> Result<Outcome> {
    let defaults = &cfg.search;
    let opts = SearchOptions {
        when: args.when.or(defaults.when),
        site: args.site.clone(),
        lang: args.lang.clone().or_else(|| defaults.lang.clone()),
        country: args.country.clone().or_else(|| defaults.country.clone()),
        safe: args.safe_flag().or(defaults.safe),
    };
    println!("{}", build_search_url(&args.query, &opts));
    Ok(Outcome::Done)
}

fn click(args: ClickArgs, cfg: &SiftConfig) -> Result<Outcome> {
    let html = read_lossy(&args.html_path)?;
    let extractor = ClickTargetExtractor::new(&cfg.click.patterns)
        .context("invalid click-target patterns in configuration")?;

    match extractor.extract(&html) {
        Some(target) => {
            println!("{target}");
            Ok(Outcome::Done)
        }
        None => {
            tracing::warn!(path = %args.html_path.display(), "no click target found");
            Ok(Outcome::NotFound)
        }
    }
}

/// Read a file as text, replacing invalid UTF-8.
fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value).context("failed to serialize results")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
