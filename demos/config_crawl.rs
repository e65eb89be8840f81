use clap::Parser;
use sitemapper::{CrawlConfig, SiteMapper, sitemap};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Crawl a site from a JSON configuration file", long_about = None)]
struct Args {
    /// Path to crawl configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Override the page cap
    #[arg(short = 'p', long)]
    max_pages: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from file
    let config = CrawlConfig::from_file(&args.config)?;

    println!("Loaded crawl configuration:");
    println!("  Start URL: {}", config.start_url);
    println!("  Max depth: {}", config.max_depth);
    println!("  Max pages: {}", config.max_pages);
    println!("  Include images: {}", config.include_images);
    println!("  Routes: {}", config.routes.len());

    let mut mapper = SiteMapper::from_config(config);

    // Apply overrides if specified
    if let Some(max_pages) = args.max_pages {
        println!("Overriding max pages: {}", max_pages);
        mapper = mapper.with_max_pages(max_pages);
    }

    let report = mapper.generate().await?;

    println!(
        "Crawled {} pages in {:.2} seconds",
        report.pages.len(),
        report.elapsed.as_secs_f64()
    );

    // The text listing is the quickest sanity check of what was found
    println!("{}", sitemap::build_txt(&report));

    Ok(())
}
