use clap::{Args, Parser, Subcommand};
use sift_serp::Freshness;
use sift_serp::filter::FilterOptions;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sift", version)]
#[command(about = "Parse and filter saved Bing results pages, build search URLs, and extract click targets")]
pub struct Cli {
    /// Configuration file (defaults to ./sift.yaml when present)
    #[arg(long, global = true, env = "SIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a saved results page into JSON records
    Parse(ParseArgs),

    /// Build a search URL with filters
    Url(UrlArgs),

    /// Print the redirect target of a saved click-tracking page
    #[command(alias = "bingclick")]
    Click(ClickArgs),
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Path to a saved results page
    pub html_path: PathBuf,

    /// Output JSON path (default: stdout)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Keywords that must all appear in title or snippet
    #[arg(long, num_args = 1..)]
    pub include: Vec<String>,

    /// Keywords that must not appear
    #[arg(long, num_args = 1..)]
    pub exclude: Vec<String>,

    /// Only keep these domains (and their subdomains)
    #[arg(long = "allow-domain", num_args = 1..)]
    pub allow_domain: Vec<String>,

    /// Drop these domains (and their subdomains)
    #[arg(long = "deny-domain", num_args = 1..)]
    pub deny_domain: Vec<String>,
}

impl ParseArgs {
    pub fn filters(&self) -> FilterOptions {
        FilterOptions {
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            allow_domains: self.allow_domain.clone(),
            deny_domains: self.deny_domain.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct UrlArgs {
    /// Query text
    pub query: String,

    /// Freshness filter: day, week, month or year
    #[arg(long)]
    pub when: Option<Freshness>,

    /// Restrict to one site
    #[arg(long)]
    pub site: Option<String>,

    /// Interface language (e.g. en-GB)
    #[arg(long)]
    pub lang: Option<String>,

    /// Market tag; also sets the country code (e.g. en-GB)
    #[arg(long)]
    pub country: Option<String>,

    /// Turn adult filtering off
    #[arg(long, conflicts_with = "strict")]
    pub safe: bool,

    /// Force strict adult filtering
    #[arg(long)]
    pub strict: bool,
}

impl UrlArgs {
    /// `Some(true)` for `--safe`, `Some(false)` for `--strict`, else `None`.
    pub fn safe_flag(&self) -> Option<bool> {
        match (self.safe, self.strict) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Args)]
pub struct ClickArgs {
    /// Path to a saved click-tracking page
    pub html_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_with_filters() {
        let cli = Cli::try_parse_from([
            "sift",
            "parse",
            "page.html",
            "--include",
            "rust",
            "async",
            "--deny-domain",
            "pinterest.com",
            "--out",
            "rows.json",
        ])
        .unwrap();
        let Command::Parse(args) = cli.command else {
            panic!("expected parse");
        };
        assert_eq!(args.html_path, PathBuf::from("page.html"));
        assert_eq!(args.out, Some(PathBuf::from("rows.json")));
        let filters = args.filters();
        assert_eq!(filters.include, ["rust", "async"]);
        assert_eq!(filters.deny_domains, ["pinterest.com"]);
        assert!(filters.allow_domains.is_empty());
    }

    #[test]
    fn url_flags() {
        let cli = Cli::try_parse_from(["sift", "url", "cats", "--when", "week", "--strict"]).unwrap();
        let Command::Url(args) = cli.command else {
            panic!("expected url");
        };
        assert_eq!(args.when, Some(Freshness::Week));
        assert_eq!(args.safe_flag(), Some(false));
    }

    #[test]
    fn safe_and_strict_conflict() {
        assert!(Cli::try_parse_from(["sift", "url", "x", "--safe", "--strict"]).is_err());
    }

    #[test]
    fn unknown_freshness_is_rejected() {
        assert!(Cli::try_parse_from(["sift", "url", "x", "--when", "fortnight"]).is_err());
    }

    #[test]
    fn bingclick_alias() {
        let cli = Cli::try_parse_from(["sift", "bingclick", "ck.html"]).unwrap();
        assert!(matches!(cli.command, Command::Click(_)));
    }
}
