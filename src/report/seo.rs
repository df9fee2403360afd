//! Meta-tag SEO heuristic.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::types::{SeoAnalysis, SeoScore};
use crate::config::SEO_META_TAG_THRESHOLD;
use crate::utils::parse_selector_with_fallback;

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta", "meta tag counting"));

/// Counts the `<meta>` elements of an HTML document.
pub fn count_meta_tags(html: &str) -> usize {
    let document = Html::parse_document(html);
    document.select(&META_SELECTOR).count()
}

/// Scores a page: more than five meta tags is "Good".
pub fn analyze_seo(html: &str) -> SeoAnalysis {
    let meta_tag_count = count_meta_tags(html);
    let score = if meta_tag_count > SEO_META_TAG_THRESHOLD {
        SeoScore::Good
    } else {
        SeoScore::NeedsImprovement
    };
    log::debug!("Found {} meta tags ({})", meta_tag_count, score);
    SeoAnalysis {
        meta_tag_count,
        score,
    }
}
