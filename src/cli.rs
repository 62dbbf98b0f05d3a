//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags; the workspace path
//! also falls back to an environment variable.

use clap::Parser;

/// Command-line arguments for the journalist binary.
///
/// # Examples
///
/// ```sh
/// # Scrape one source, keep everything in memory
/// journalist --memory https://www.fanatik.com.tr/futbol
///
/// # Keyword-filtered, depth-2 crawl persisted to a custom workspace
/// journalist -k mourinho -k transfer -d 2 -w ./sessions https://www.fanatik.com.tr/futbol
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Seed URLs to read articles from
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Keyword filter for discovered links and article content (repeatable)
    #[arg(short, long)]
    pub keywords: Vec<String>,

    /// How many levels of discovered links to follow
    #[arg(short = 'd', long, default_value_t = 1)]
    pub scrape_depth: usize,

    /// Buffer articles in memory instead of writing session files
    #[arg(long)]
    pub memory: bool,

    /// Workspace directory for persisted sessions
    #[arg(short, long, env = "JOURNALIST_WORKSPACE", default_value = ".journalist_workspace")]
    pub workspace: String,

    /// Drop articles older than this many days
    #[arg(long)]
    pub max_age_days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["journalist", "https://a.test"]);
        assert_eq!(cli.urls, vec!["https://a.test"]);
        assert!(cli.keywords.is_empty());
        assert_eq!(cli.scrape_depth, 1);
        assert!(!cli.memory);
        assert_eq!(cli.workspace, ".journalist_workspace");
        assert_eq!(cli.max_age_days, None);
    }

    #[test]
    fn test_cli_full_invocation() {
        let cli = Cli::parse_from([
            "journalist",
            "-k",
            "mourinho",
            "-k",
            "transfer",
            "-d",
            "2",
            "--memory",
            "--max-age-days",
            "7",
            "https://a.test",
            "https://b.test",
        ]);

        assert_eq!(cli.urls.len(), 2);
        assert_eq!(cli.keywords, vec!["mourinho", "transfer"]);
        assert_eq!(cli.scrape_depth, 2);
        assert!(cli.memory);
        assert_eq!(cli.max_age_days, Some(7));
    }

    #[test]
    fn test_cli_requires_urls() {
        assert!(Cli::try_parse_from(["journalist"]).is_err());
    }
}
