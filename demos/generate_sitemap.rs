use clap::Parser;
use sitemapper::{SiteMapper, sitemap};
use std::error::Error;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(version, about = "Crawl a site and print its sitemap XML", long_about = None)]
struct Args {
    /// URL to crawl
    #[arg(short, long)]
    url: String,

    /// Maximum link depth
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// Maximum number of pages
    #[arg(short = 'p', long)]
    max_pages: Option<usize>,

    /// Collect image references
    #[arg(short, long)]
    images: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    println!("Crawling {}", args.url);

    let mut mapper = SiteMapper::new(&args.url).with_images(args.images);

    // Apply command-line overrides
    if let Some(max_depth) = args.max_depth {
        println!("Overriding max depth: {}", max_depth);
        mapper = mapper.with_max_depth(max_depth);
    }

    if let Some(max_pages) = args.max_pages {
        println!("Overriding max pages: {}", max_pages);
        mapper = mapper.with_max_pages(max_pages);
    }

    // Print progress as pages are admitted
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
    mapper = mapper.with_progress(progress_tx);

    let printer = tokio::spawn(async move {
        while let Some(update) = progress_rx.recv().await {
            println!("[{}/{}] {}", update.visited, update.max_pages, update.url);
        }
    });

    let report = mapper.generate().await?;
    let _ = printer.await;

    println!();
    println!(
        "Crawled {} pages ({} images) in {:.2} seconds",
        report.pages.len(),
        report.images.len(),
        report.elapsed.as_secs_f64()
    );
    println!();
    println!("{}", sitemap::build_xml(&report));

    Ok(())
}
