//! Configured scrape targets
//!
//! Two target shapes: news listing pages located via structural
//! selectors, and product home pages carrying fixed display metadata.
//! The shipped defaults can be replaced wholesale from the config
//! file's `[[sites.news]]` / `[[sites.products]]` tables.

use serde::{Deserialize, Serialize};

/// Selectors locating the fields of a repeating article block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// The repeating article container
    pub articles: String,
    /// Title element within a block (first match wins)
    pub title: String,
    /// Description element within a block
    pub description: String,
    /// Link element within a block
    pub link: String,
}

/// A news listing page to scan for article blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    pub url: String,
    pub selectors: ListingSelectors,
}

/// A product's own home page, cataloged under a fixed name/category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSiteProfile {
    pub url: String,
    /// Display name, also the title used for catalog identity
    pub name: String,
    pub category: String,
}

/// News and product site lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesConfig {
    #[serde(default = "default_news_sites")]
    pub news: Vec<SiteProfile>,
    #[serde(default = "default_product_sites")]
    pub products: Vec<ProductSiteProfile>,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            news: default_news_sites(),
            products: default_product_sites(),
        }
    }
}

fn listing(articles: &str, title: &str, description: &str, link: &str) -> ListingSelectors {
    ListingSelectors {
        articles: articles.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        link: link.to_string(),
    }
}

fn default_news_sites() -> Vec<SiteProfile> {
    vec![
        SiteProfile {
            url: "https://www.wired.com/tag/wearables/".to_string(),
            selectors: listing("article", "h2, h3", "p", "a"),
        },
        SiteProfile {
            url: "https://techcrunch.com/tag/wearables/".to_string(),
            selectors: listing("article", "h2", ".post-block__content", "a.post-block__title__link"),
        },
        SiteProfile {
            url: "https://www.theverge.com/wearables".to_string(),
            selectors: listing(
                ".c-entry-box--compact",
                "h2",
                ".c-entry-box--compact__dek",
                "a.c-entry-box--compact__image-wrapper",
            ),
        },
        SiteProfile {
            url: "https://www.cnet.com/topics/wearable-tech/".to_string(),
            selectors: listing(".c-storiesListItem", "h3", "p", "a"),
        },
    ]
}

fn default_product_sites() -> Vec<ProductSiteProfile> {
    let profile = |url: &str, name: &str, category: &str| ProductSiteProfile {
        url: url.to_string(),
        name: name.to_string(),
        category: category.to_string(),
    };

    vec![
        profile("https://hu.ma.ne/", "Humane AI Pin", "AI Assistant"),
        profile("https://www.meta.com/smart-glasses/", "Meta Ray-Ban Smart Glasses", "Smart Glasses"),
        profile("https://www.apple.com/apple-watch-ultra/", "Apple Watch Ultra", "Smartwatch"),
        profile("https://ouraring.com/", "Oura Ring", "Health Monitor"),
        profile("https://www.rabbit.tech/", "Rabbit R1", "AI Assistant"),
    ]
}
