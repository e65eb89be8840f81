use clap::Parser;
use sitemapper::{CrawlConfig, SiteMapper, sitemap};
use tokio::sync::mpsc;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match CrawlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        // The URL argument is required when no config file is given
        None => CrawlConfig::new(""),
    };

    if let Some(url) = &args.url {
        config.start_url = url.clone();
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(timeout) = args.timeout {
        config.fetch_timeout_secs = timeout;
    }
    if args.images {
        config.include_images = true;
    }

    ::log::info!("Starting sitemap crawl for {}", config.start_url);

    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
    let mapper = SiteMapper::from_config(config).with_progress(progress_tx);

    // First Ctrl-C requests cancellation; pages collected so far still get written
    let cancel = mapper.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ::log::warn!("Cancellation requested, stopping after the current page");
            cancel.cancel();
        }
    });

    let printer = tokio::spawn(async move {
        while let Some(update) = progress_rx.recv().await {
            println!("[{}/{}] {}", update.visited, update.max_pages, update.url);
        }
    });

    let report = match mapper.generate().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Sitemap generation failed: {}", e);
            std::process::exit(1);
        }
    };

    // The progress sender is gone once the crawl returns, so this finishes
    let _ = printer.await;

    if report.cancelled {
        println!(
            "Crawl cancelled, writing the {} pages collected before the stop",
            report.pages.len()
        );
    }

    let xml_path = args.output.join("sitemap.xml");
    let txt_path = args.output.join("sitemap.txt");

    if let Err(e) = std::fs::write(&xml_path, sitemap::build_xml(&report)) {
        ::log::error!("Failed to write {}: {}", xml_path.display(), e);
        std::process::exit(1);
    }
    if let Err(e) = std::fs::write(&txt_path, sitemap::build_txt(&report)) {
        ::log::error!("Failed to write {}: {}", txt_path.display(), e);
        std::process::exit(1);
    }

    println!();
    println!("Pages:   {}", report.pages.len());
    println!("Images:  {}", report.images.len());
    println!("Elapsed: {:.1}s", report.elapsed.as_secs_f64());
    println!("Wrote {} and {}", xml_path.display(), txt_path.display());

    if args.tree {
        println!();
        for (depth, pages) in report.pages_by_depth() {
            for page in pages {
                let marker = if depth == 0 { "*" } else { "-" };
                println!("{}{} {}", "  ".repeat(depth), marker, page.url);
            }
        }
    }

    if args.list {
        println!();
        for page in &report.pages {
            println!("{} (depth {})", page.url, page.depth);
        }
    }
}
