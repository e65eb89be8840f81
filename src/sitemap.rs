use url::Url;

use crate::filter::same_domain;
use crate::results::{CrawlReport, ImageRecord, PageRecord};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Render the sitemap XML document for a finished crawl.
///
/// One `<url>` element per page in discovery order. The image namespace and
/// per-page `<image:image>` blocks appear only when the crawl collected
/// images; each page lists the images hosted on its own domain.
pub fn build_xml(report: &CrawlReport) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\"", SITEMAP_NS));
    if !report.images.is_empty() {
        xml.push_str(&format!(" xmlns:image=\"{}\"", IMAGE_NS));
    }
    xml.push_str(">\n");

    for page in &report.pages {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&page.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            page.last_modified.format("%Y-%m-%d")
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            page.change_freq
        ));
        xml.push_str(&format!(
            "    <priority>{}</priority>\n",
            page.priority_label()
        ));

        if !report.images.is_empty() {
            for image in page_images(page, &report.images) {
                xml.push_str("    <image:image>\n");
                xml.push_str(&format!(
                    "      <image:loc>{}</image:loc>\n",
                    escape_xml(&image.url)
                ));
                if !image.alt.is_empty() {
                    xml.push_str(&format!(
                        "      <image:title>{}</image:title>\n",
                        escape_xml(&image.alt)
                    ));
                }
                if !image.title.is_empty() {
                    xml.push_str(&format!(
                        "      <image:caption>{}</image:caption>\n",
                        escape_xml(&image.title)
                    ));
                }
                xml.push_str("    </image:image>\n");
            }
        }

        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>");
    xml
}

/// Render the plain-text sitemap, one page URL per line in discovery order
pub fn build_txt(report: &CrawlReport) -> String {
    report
        .pages
        .iter()
        .map(|page| page.url.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Images attributed to a page: those hosted on the page's own domain
fn page_images<'a>(page: &PageRecord, images: &'a [ImageRecord]) -> Vec<&'a ImageRecord> {
    let Ok(page_url) = Url::parse(&page.url) else {
        return Vec::new();
    };

    images
        .iter()
        .filter(|image| match Url::parse(&image.url) {
            Ok(image_url) => same_domain(&image_url, &page_url),
            Err(_) => false,
        })
        .collect()
}

/// Escape the five reserved XML characters
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
