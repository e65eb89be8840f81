use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sitemapper")]
#[command(about = "Generates sitemap.xml and sitemap.txt by crawling a site")]
#[command(version)]
pub struct Args {
    /// URL to crawl; https:// is assumed when the scheme is missing
    #[arg(required_unless_present = "config")]
    pub url: Option<String>,

    /// Maximum link depth below the start page (default 2)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Maximum number of pages to visit (default 100)
    #[arg(short = 'p', long)]
    pub max_pages: Option<usize>,

    /// Collect image references into the sitemap
    #[arg(short, long)]
    pub images: bool,

    /// Per-request timeout in seconds (default 30)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory the sitemap files are written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// JSON configuration file; flags given here override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the depth-grouped page tree after the crawl
    #[arg(long)]
    pub tree: bool,

    /// Print the flat page list with depths after the crawl
    #[arg(long)]
    pub list: bool,
}
