use clap::Parser;
use std::path::PathBuf;

use crate::export::DEFAULT_EXPORT_PATH;
use crate::fetch::DEFAULT_REPORT_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "pricedash")]
#[command(about = "Render a wholesale price-comparison report as a terminal dashboard")]
#[command(version)]
pub struct CliArgs {
    /// URL of the comparison report JSON (one GET, no retry)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Read the report from a local JSON file instead of fetching it
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Filter cards once with this query (whitespace-separated terms, AND)
    #[arg(long, short = 'f', value_name = "QUERY")]
    pub filter: Option<String>,

    /// Read filter queries interactively from stdin (blank line clears)
    #[arg(long)]
    pub interactive: bool,

    /// Save the fetched report as pretty-printed JSON
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_PATH)]
    pub export: Option<PathBuf>,

    /// Quiet period before an interactive query re-filters the cards
    #[arg(long, value_name = "MILLIS", default_value = "150")]
    pub debounce_ms: u64,

    /// Override console width for testing (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_some() && self.input.is_some() {
            return Err("Cannot specify both --url and --input".to_string());
        }

        if self.interactive && self.filter.is_some() {
            return Err("Cannot combine --interactive with --filter; enter the query at the prompt".to_string());
        }

        if self.debounce_ms == 0 {
            return Err("--debounce-ms must be greater than zero".to_string());
        }

        Ok(())
    }

    /// The URL to fetch when no local input file is given
    pub fn report_url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_REPORT_URL)
    }
}
