use crate::error::CrawlError;
use regex::Regex;
use url::Url;

/// Turn a raw href into a crawlable absolute URL, or `None` when the href
/// does not navigate anywhere (anchors, scripts, mail links, junk).
///
/// Fragments are always stripped so that two links to the same document
/// compare equal.
pub fn normalize_href(href: &str, base: &Url) -> Option<Url> {
    let trimmed = href.trim();
    if trimmed.is_empty() || trimmed == "#" {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("mailto:") {
        return None;
    }

    let mut resolved = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Url::parse(trimmed).ok()?
    } else if let Some(rest) = trimmed.strip_prefix("//") {
        // Protocol-relative URLs are assumed to be https
        Url::parse(&format!("https://{}", rest)).ok()?
    } else {
        // Root-relative and relative paths both resolve against the base;
        // join drops the last path segment when the base has no trailing slash
        base.join(trimmed).ok()?
    };

    resolved.set_fragment(None);
    Some(resolved)
}

/// Whether two URLs point at the same site.
///
/// Hostnames must match exactly; scheme, port and path are ignored. A URL
/// without a hostname never matches anything.
pub fn same_domain(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(host_a), Some(host_b)) => host_a == host_b,
        _ => false,
    }
}

/// Prepare a user-supplied start URL for crawling.
///
/// A missing scheme gets an `https://` prefix, the fragment is stripped, and
/// anything that still fails to parse (or has no host to scope the crawl to)
/// is rejected.
pub fn prepare_start_url(raw: &str) -> Result<Url, CrawlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CrawlError::InvalidStartUrl {
            url: raw.to_string(),
            reason: "URL is empty".to_string(),
        });
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&candidate).map_err(|e| CrawlError::InvalidStartUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.host_str().is_none() {
        return Err(CrawlError::InvalidStartUrl {
            url: raw.to_string(),
            reason: "URL has no host".to_string(),
        });
    }

    url.set_fragment(None);
    Ok(url)
}

/// Admission filter compiled from include/exclude regex patterns.
///
/// Exclude patterns take precedence over include patterns; an empty include
/// list admits every URL.
#[derive(Debug, Default)]
pub struct LinkFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl LinkFilter {
    /// Compile the configured patterns, naming the offending one on failure
    pub fn new(
        include_patterns: &[String],
        exclude_patterns: &[String],
    ) -> Result<Self, CrawlError> {
        let mut include = Vec::with_capacity(include_patterns.len());
        for pattern in include_patterns {
            include.push(compile(pattern)?);
        }

        let mut exclude = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude.push(compile(pattern)?);
        }

        Ok(Self { include, exclude })
    }

    /// Whether a URL passes the configured patterns
    pub fn admits(&self, url: &Url) -> bool {
        let url_str = url.as_str();

        for regex in &self.exclude {
            if regex.is_match(url_str) {
                return false;
            }
        }

        if !self.include.is_empty() {
            return self.include.iter().any(|regex| regex.is_match(url_str));
        }

        true
    }
}

fn compile(pattern: &str) -> Result<Regex, CrawlError> {
    Regex::new(pattern).map_err(|source| CrawlError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
