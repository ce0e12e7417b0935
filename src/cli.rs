//! Command-line interface definitions for samplecmd.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the sample command finder.
///
/// # Examples
///
/// ```sh
/// # Five sampled results for "tar"
/// samplecmd tar
///
/// # Ten results with descriptions and source links
/// samplecmd -d -r -l 10 tar
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about = "Sample Command Finder")]
pub struct Cli {
    /// Keyword to search commands for
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Show command descriptions
    #[arg(short = 'd')]
    pub show_description: bool,

    /// Show command source links
    #[arg(short = 'r')]
    pub show_source_links: bool,

    /// Limit the number of results
    #[arg(short = 'l', long = "limit", default_value_t = 5)]
    pub limit: usize,

    /// Additional directory of site descriptor files to search
    #[arg(long, value_name = "DIR")]
    pub sites_dir: Option<PathBuf>,
}
