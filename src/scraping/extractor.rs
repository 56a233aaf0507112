//! Markup extraction
//!
//! Two extraction shapes over static HTML:
//! - listing shape: repeating article blocks on a news page, located by
//!   a site profile's selectors
//! - single-page shape: title, meta description, headings, body text,
//!   and a best-effort price token from one product page
//!
//! Missing-but-optional fields degrade to empty values instead of
//! erroring; only total fetch failure is an error condition upstream.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::config::SiteProfile;

/// One `(title, description, link)` tuple from a listing page
#[derive(Debug, Clone)]
pub struct ListingItem {
    pub title: String,
    pub description: String,
    /// Absolute URL when the block carried a resolvable link
    pub link: Option<String>,
}

/// Structured fields from a single product page
#[derive(Debug, Clone)]
pub struct PageSummary {
    /// Document `<title>` text
    pub title: String,
    /// `<meta name="description">` content
    pub description: String,
    /// h1 texts then h2 texts, each in document order
    pub headings: Vec<String>,
    /// All text under `<body>`
    pub body_text: String,
    /// First currency-prefixed or currency-suffixed token, else "Unknown"
    pub price: String,
}

/// HTML extractor with pre-compiled document-level selectors
pub struct Extractor {
    title_sel: Selector,
    meta_description_sel: Selector,
    h1_sel: Selector,
    h2_sel: Selector,
    body_sel: Selector,
    price_re: Regex,
}

impl Extractor {
    pub fn new() -> Self {
        // Static selectors and pattern; parse failures are programmer
        // errors, not runtime conditions
        Self {
            title_sel: Selector::parse("title").unwrap(),
            meta_description_sel: Selector::parse("meta[name='description']").unwrap(),
            h1_sel: Selector::parse("h1").unwrap(),
            h2_sel: Selector::parse("h2").unwrap(),
            body_sel: Selector::parse("body").unwrap(),
            price_re: Regex::new(r"(\$\d+(\.\d{2})?)|(\d+\s*\$)").unwrap(),
        }
    }

    /// Extract listing tuples from a news page per the site's profile.
    ///
    /// Within each repeating block the first match wins for title,
    /// description, and link. Blocks with an empty title are skipped.
    /// Root-relative links are resolved against the site's own
    /// scheme and host. An unparseable articles selector yields zero
    /// items; unparseable field selectors yield empty fields.
    pub fn listing(&self, html: &str, profile: &SiteProfile) -> Vec<ListingItem> {
        let articles_sel = match Selector::parse(&profile.selectors.articles) {
            Ok(sel) => sel,
            Err(_) => {
                warn!(site = %profile.url, selector = %profile.selectors.articles,
                    "invalid articles selector, skipping site");
                return Vec::new();
            }
        };
        let title_sel = Selector::parse(&profile.selectors.title).ok();
        let description_sel = Selector::parse(&profile.selectors.description).ok();
        let link_sel = Selector::parse(&profile.selectors.link).ok();

        let base = Url::parse(&profile.url).ok();
        let document = Html::parse_document(html);
        let mut items = Vec::new();

        for block in document.select(&articles_sel) {
            let title = first_text(&block, title_sel.as_ref());
            if title.is_empty() {
                continue;
            }

            let description = first_text(&block, description_sel.as_ref());
            let link = link_sel
                .as_ref()
                .and_then(|sel| block.select(sel).next())
                .and_then(|el| el.value().attr("href"))
                .map(|href| resolve_link(href, base.as_ref()));

            items.push(ListingItem {
                title,
                description,
                link,
            });
        }

        items
    }

    /// Extract the single-page shape from one product or ad-hoc page.
    pub fn page(&self, html: &str) -> PageSummary {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.title_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let description = document
            .select(&self.meta_description_sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .unwrap_or_default()
            .trim()
            .to_string();

        let mut headings: Vec<String> = document
            .select(&self.h1_sel)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect();
        headings.extend(
            document
                .select(&self.h2_sel)
                .map(element_text)
                .filter(|t| !t.is_empty()),
        );

        let body_text = document
            .select(&self.body_sel)
            .next()
            .map(|body| body.text().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();

        let price = self
            .price_re
            .find(&body_text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        PageSummary {
            title,
            description,
            headings,
            body_text,
            price,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(block: &ElementRef<'_>, sel: Option<&Selector>) -> String {
    sel.and_then(|s| block.select(s).next())
        .map(element_text)
        .unwrap_or_default()
}

/// Resolve a root-relative href against the site's scheme and host;
/// anything else passes through unchanged.
fn resolve_link(href: &str, base: Option<&Url>) -> String {
    if href.starts_with('/') {
        if let Some(base) = base {
            if let Ok(resolved) = base.join(href) {
                return resolved.to_string();
            }
        }
    }
    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListingSelectors;

    fn profile() -> SiteProfile {
        SiteProfile {
            url: "https://example.com/wearables".to_string(),
            selectors: ListingSelectors {
                articles: "article".to_string(),
                title: "h2".to_string(),
                description: "p".to_string(),
                link: "a".to_string(),
            },
        }
    }

    #[test]
    fn test_listing_extraction() {
        let html = r#"
            <html><body>
                <article>
                    <h2>First article</h2>
                    <p>First description</p>
                    <a href="https://example.com/first">read</a>
                </article>
                <article>
                    <h2>Second article</h2>
                    <p>Second description</p>
                    <a href="/second">read</a>
                </article>
            </body></html>
        "#;

        let items = Extractor::new().listing(html, &profile());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First article");
        assert_eq!(items[0].description, "First description");
        assert_eq!(items[0].link.as_deref(), Some("https://example.com/first"));
        // Root-relative link resolved against the site's scheme+host
        assert_eq!(items[1].link.as_deref(), Some("https://example.com/second"));
    }

    #[test]
    fn test_listing_skips_blocks_without_title() {
        let html = r#"
            <article><p>no title here</p><a href="/x">x</a></article>
            <article><h2>Titled</h2></article>
        "#;

        let items = Extractor::new().listing(html, &profile());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Titled");
        assert!(items[0].link.is_none());
    }

    #[test]
    fn test_listing_first_match_within_block() {
        let html = r#"
            <article>
                <h2>Primary title</h2>
                <h2>Secondary title</h2>
                <p>Primary description</p>
                <p>Secondary description</p>
                <a href="/one">one</a>
                <a href="/two">two</a>
            </article>
        "#;

        let items = Extractor::new().listing(html, &profile());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Primary title");
        assert_eq!(items[0].description, "Primary description");
        assert_eq!(items[0].link.as_deref(), Some("https://example.com/one"));
    }

    #[test]
    fn test_invalid_articles_selector_yields_nothing() {
        let mut bad = profile();
        bad.selectors.articles = ":::".to_string();
        let items = Extractor::new().listing("<article><h2>t</h2></article>", &bad);
        assert!(items.is_empty());
    }

    #[test]
    fn test_page_extraction() {
        let html = r#"
            <html>
            <head>
                <title>Acme Band</title>
                <meta name="description" content="A band for your wrist">
            </head>
            <body>
                <h1>Acme Band</h1>
                <h2>Specs</h2>
                <h2>Reviews</h2>
                <p>Available now for $299.99 with free shipping.</p>
            </body>
            </html>
        "#;

        let summary = Extractor::new().page(html);
        assert_eq!(summary.title, "Acme Band");
        assert_eq!(summary.description, "A band for your wrist");
        assert_eq!(summary.headings, vec!["Acme Band", "Specs", "Reviews"]);
        assert!(summary.body_text.contains("free shipping"));
        assert_eq!(summary.price, "$299.99");
    }

    #[test]
    fn test_page_missing_fields_degrade() {
        let summary = Extractor::new().page("<html><body><p>plain</p></body></html>");
        assert_eq!(summary.title, "");
        assert_eq!(summary.description, "");
        assert!(summary.headings.is_empty());
        assert_eq!(summary.price, "Unknown");
    }

    #[test]
    fn test_price_currency_suffix() {
        let summary = Extractor::new().page("<body>on sale at 199 $ today</body>");
        assert_eq!(summary.price, "199 $");
    }
}
