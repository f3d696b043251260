//! Accent-insensitive prefix search over the product catalog.
//!
//! A query matches a product when any whitespace-delimited word of the
//! product's name or category starts with the query. Both sides are compared
//! raw and with Vietnamese diacritics stripped, in all four combinations, so
//! a user typing plain Latin characters still matches accented names and
//! vice versa ("chuot" matches "Chuột Gaming Logitech", "Chuộ" matches too).
//!
//! Filters and sorting are applied after the text match. Sorting copies the
//! working set; the caller's slice is never reordered.

use serde::{Deserialize, Serialize};

use techstore_core::Category;
use techstore_core::text::strip_diacritics;

use crate::catalog::Product;

/// Maximum number of search-as-you-type suggestions.
const MAX_SUGGESTIONS: usize = 8;

/// Brand tokens recognized for suggestion derivation.
const BRANDS: &[&str] = &[
    "hp", "dell", "lenovo", "asus", "canon", "sony", "logitech", "apple", "samsung",
];

/// An inclusive price range on the canonical price field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    /// Create a new inclusive range.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    const fn contains(&self, price: i64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Search filters, applied as a conjunction after the text match.
#[derive(Debug, Default, Clone)]
pub struct SearchFilters {
    /// Exact category match. `None` means no category filtering.
    pub category: Option<Category>,
    /// Inclusive price range on `price_number`.
    pub price_range: Option<PriceRange>,
    /// Minimum rating threshold (inclusive).
    pub min_rating: Option<f32>,
    /// Result ordering.
    pub sort_by: SearchSort,
}

/// Search sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SearchSort {
    /// Keep the catalog's original order.
    #[default]
    Default,
    /// Price ascending.
    PriceLow,
    /// Price descending.
    PriceHigh,
    /// Rating descending.
    Rating,
    /// Creation date descending.
    Newest,
}

impl SearchSort {
    /// Parse from a URL/CLI parameter value.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Default,
        }
    }

    /// Convert to a URL/CLI parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }
}

/// Whether any whitespace-delimited word in `text` starts with `query`.
///
/// Four-way comparison: each of raw word and stripped word is tested against
/// each of raw query and stripped query, all case-insensitively. An empty or
/// whitespace-only query never matches (callers skip the text filter for
/// empty queries instead).
#[must_use]
pub fn has_word_starting_with(text: &str, query: &str) -> bool {
    if query.trim().is_empty() {
        return false;
    }

    let query_lower = query.to_lowercase();
    let query_stripped = strip_diacritics(query);

    text.split_whitespace().any(|word| {
        let word_lower = word.to_lowercase();
        let word_stripped = strip_diacritics(word);
        word_lower.starts_with(&query_lower)
            || word_stripped.starts_with(&query_stripped)
            || word_lower.starts_with(&query_stripped)
            || word_stripped.starts_with(&query_lower)
    })
}

fn matches_query(product: &Product, query: &str) -> bool {
    has_word_starting_with(&product.name, query)
        || has_word_starting_with(product.category.as_str(), query)
}

/// Search the catalog.
///
/// An empty query matches every product; filters and sort still apply.
#[must_use]
pub fn search_products(products: &[Product], query: &str, filters: &SearchFilters) -> Vec<Product> {
    let mut results: Vec<Product> = products
        .iter()
        .filter(|p| query.trim().is_empty() || matches_query(p, query))
        .filter(|p| {
            filters
                .category
                .as_ref()
                .is_none_or(|c| &p.category == c)
        })
        .filter(|p| {
            filters
                .price_range
                .is_none_or(|range| range.contains(p.price_number))
        })
        .filter(|p| filters.min_rating.is_none_or(|min| p.rating >= min))
        .cloned()
        .collect();

    match filters.sort_by {
        SearchSort::Default => {}
        SearchSort::PriceLow => results.sort_by_key(|p| p.price_number),
        SearchSort::PriceHigh => results.sort_by_key(|p| std::cmp::Reverse(p.price_number)),
        SearchSort::Rating => {
            results.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal));
        }
        SearchSort::Newest => results.sort_by_key(|p| std::cmp::Reverse(p.created_at)),
    }

    results
}

/// Derive search-as-you-type suggestions for `query`.
///
/// Matching products contribute their lowercased category, their own name
/// words (when the word itself prefix-matches the query and is longer than
/// 2 characters), and `"{category} {brand}"` pairs for brand tokens that
/// prefix-match the query or the product name. Deduplicated in insertion
/// order, capped at 8.
#[must_use]
pub fn search_suggestions(products: &[Product], query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<String> = Vec::new();
    let mut push = |s: String| {
        if !suggestions.contains(&s) && suggestions.len() < MAX_SUGGESTIONS {
            suggestions.push(s);
        }
    };

    for product in products.iter().filter(|p| matches_query(p, query)) {
        let category = product.category.as_str().to_lowercase();
        push(category.clone());

        for word in product.name.split_whitespace() {
            if word.chars().count() > 2 && has_word_starting_with(word, query) {
                push(word.to_lowercase());
            }
        }

        for brand in BRANDS {
            if has_word_starting_with(brand, query) || has_word_starting_with(&product.name, brand)
            {
                push(format!("{category} {brand}"));
            }
        }
    }

    suggestions
}

/// Canned popular searches shown before the user types anything.
#[must_use]
pub fn popular_searches() -> Vec<&'static str> {
    vec![
        "camera 4k",
        "laptop gaming",
        "macbook pro",
        "tai nghe bluetooth",
        "chuột gaming",
        "bàn phím cơ",
        "camera an ninh",
        "laptop dell",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::fixture()
    }

    #[test]
    fn test_prefix_match_on_name_word() {
        let results = search_products(catalog().all(), "cam", &SearchFilters::default());
        assert!(results.iter().any(|p| p.name == "Camera HD Pro 4K"));
        // Every match starts a word with "cam" in name or category.
        for p in &results {
            assert!(
                has_word_starting_with(&p.name, "cam")
                    || has_word_starting_with(p.category.as_str(), "cam")
            );
        }
    }

    #[test]
    fn test_mid_word_does_not_match() {
        // "pro" appears mid-name in "Inspiron" but only word-initial
        // occurrences count.
        assert!(!has_word_starting_with("Dell Inspiron 15", "spi"));
        assert!(!has_word_starting_with("Xcam", "cam"));
        assert!(has_word_starting_with("MacBook Pro M3", "pro"));
    }

    #[test]
    fn test_accent_insensitive_both_directions() {
        assert!(has_word_starting_with("Chuột Gaming Logitech", "chuot"));
        assert!(has_word_starting_with("Chuot Gaming", "chuộ"));
        assert!(has_word_starting_with("Phụ kiện", "phu"));
    }

    #[test]
    fn test_empty_query_returns_all() {
        let all = catalog();
        let results = search_products(all.all(), "", &SearchFilters::default());
        assert_eq!(results.len(), all.all().len());
    }

    #[test]
    fn test_laptop_query_price_low() {
        let filters = SearchFilters {
            sort_by: SearchSort::PriceLow,
            ..Default::default()
        };
        let results = search_products(catalog().all(), "laptop", &filters);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.category == Category::Laptop));
        for pair in results.windows(2) {
            assert!(pair[0].price_number <= pair[1].price_number);
        }
    }

    #[test]
    fn test_category_filter_conjunction() {
        let filters = SearchFilters {
            category: Some(Category::Camera),
            ..Default::default()
        };
        let results = search_products(catalog().all(), "", &filters);
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_price_range_inclusive() {
        let filters = SearchFilters {
            price_range: Some(PriceRange::new(1_200_000, 3_500_000)),
            ..Default::default()
        };
        let results = search_products(catalog().all(), "", &filters);
        // Exactly the three accessories sit inside this range, bounds included.
        assert_eq!(results.len(), 3);
        assert!(results.iter().any(|p| p.price_number == 1_200_000));
        assert!(results.iter().any(|p| p.price_number == 3_500_000));
    }

    #[test]
    fn test_min_rating_filter() {
        let filters = SearchFilters {
            min_rating: Some(4.8),
            ..Default::default()
        };
        let results = search_products(catalog().all(), "", &filters);
        assert!(results.iter().all(|p| p.rating >= 4.8));
        assert!(!results.is_empty());
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let all = catalog();
        let before: Vec<_> = all.all().iter().map(|p| p.id).collect();
        let filters = SearchFilters {
            sort_by: SearchSort::PriceHigh,
            ..Default::default()
        };
        let _ = search_products(all.all(), "", &filters);
        let after: Vec<_> = all.all().iter().map(|p| p.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sort_newest_descending() {
        let filters = SearchFilters {
            sort_by: SearchSort::Newest,
            ..Default::default()
        };
        let results = search_products(catalog().all(), "", &filters);
        for pair in results.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_sort_parse_roundtrip() {
        for sort in [
            SearchSort::Default,
            SearchSort::PriceLow,
            SearchSort::PriceHigh,
            SearchSort::Rating,
            SearchSort::Newest,
        ] {
            assert_eq!(SearchSort::parse(sort.as_str()), sort);
        }
        assert_eq!(SearchSort::parse("garbage"), SearchSort::Default);
    }

    #[test]
    fn test_suggestions_include_matching_name_words() {
        let suggestions = search_suggestions(catalog().all(), "len");
        assert!(suggestions.iter().any(|s| s == "lenovo"));
    }

    #[test]
    fn test_suggestions_include_matching_category() {
        let suggestions = search_suggestions(catalog().all(), "chuot");
        assert!(suggestions.iter().any(|s| s == "phụ kiện"));

        let suggestions = search_suggestions(catalog().all(), "dell");
        assert!(suggestions.iter().any(|s| s == "laptop"));
    }

    #[test]
    fn test_suggestions_brand_category_pairs() {
        let suggestions = search_suggestions(catalog().all(), "dell");
        assert!(suggestions.iter().any(|s| s == "laptop dell"));
    }

    #[test]
    fn test_suggestions_capped_and_deduped() {
        let suggestions = search_suggestions(catalog().all(), "ca");
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
        let mut seen = suggestions.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), suggestions.len());
    }

    #[test]
    fn test_suggestions_empty_query() {
        assert!(search_suggestions(catalog().all(), "  ").is_empty());
    }
}
