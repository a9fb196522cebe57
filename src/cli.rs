//! Command-line interface definitions.

use clap::Parser;

/// Command-line arguments for the article digest tool.
///
/// URLs can be given directly, read from a file (one per line), or both.
///
/// # Examples
///
/// ```sh
/// # Summarize two pages concurrently
/// article-digest -u example.com/story-one -u example.com/story-two
///
/// # Sequential mode with a URL file and a config override
/// article-digest -f urls.txt --sequential -c config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL to process (repeatable)
    #[arg(short, long = "url")]
    pub urls: Vec<String>,

    /// File containing one URL per line
    #[arg(short = 'f', long)]
    pub urls_file: Option<String>,

    /// Path to a YAML config file
    #[arg(short, long, env = "ARTICLE_DIGEST_CONFIG")]
    pub config: Option<String>,

    /// Output directory for JSON reports (overrides config)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Process URLs one at a time instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Concurrent lane count (overrides config)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "article-digest",
            "--url",
            "example.com/a",
            "--url",
            "example.com/b",
            "--sequential",
        ]);
        assert_eq!(cli.urls, vec!["example.com/a", "example.com/b"]);
        assert!(cli.sequential);
        assert!(cli.urls_file.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["article-digest", "-u", "example.com/a", "-f", "urls.txt"]);
        assert_eq!(cli.urls, vec!["example.com/a"]);
        assert_eq!(cli.urls_file.as_deref(), Some("urls.txt"));
    }
}
