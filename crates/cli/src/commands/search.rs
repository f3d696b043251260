//! Catalog search command.

use techstore_core::Category;
use techstore_storefront::catalog::Catalog;
use techstore_storefront::search::{
    PriceRange, SearchFilters, SearchSort, popular_searches, search_products, search_suggestions,
};

use super::format_vnd;

/// Accept category names case- and accent-insensitively ("camera",
/// "phu kien", "Phụ kiện" all work).
fn parse_category(raw: &str) -> Category {
    match techstore_core::text::strip_diacritics(raw).as_str() {
        "camera" => Category::Camera,
        "laptop" => Category::Laptop,
        "phu kien" | "accessory" => Category::Accessory,
        _ => Category::parse(raw),
    }
}

/// Run a search against the fixture catalog and print the results.
pub fn run(
    query: &str,
    category: Option<&str>,
    sort: &str,
    min_rating: Option<f32>,
    min_price: Option<i64>,
    max_price: Option<i64>,
) {
    let catalog = Catalog::fixture();

    let price_range = match (min_price, max_price) {
        (None, None) => None,
        (min, max) => Some(PriceRange::new(min.unwrap_or(0), max.unwrap_or(i64::MAX))),
    };

    let filters = SearchFilters {
        category: category.map(parse_category),
        price_range,
        min_rating,
        sort_by: SearchSort::parse(sort),
    };

    let results = search_products(catalog.all(), query, &filters);
    if results.is_empty() {
        println!("No products match \"{query}\"");
        return;
    }

    println!(
        "{:<4} {:<28} {:<10} {:>14} {:>7}",
        "ID", "NAME", "CATEGORY", "PRICE", "RATING"
    );
    for product in &results {
        println!(
            "{:<4} {:<28} {:<10} {:>14} {:>7.1}",
            product.id,
            product.name,
            product.category.as_str(),
            format_vnd(product.price_number),
            product.rating,
        );
    }
    println!("{} product(s)", results.len());
}

/// Print suggestions for a partial query (or the popular searches when the
/// query is blank).
pub fn suggest(query: &str) {
    if query.trim().is_empty() {
        println!("Popular searches:");
        for term in popular_searches() {
            println!("  {term}");
        }
        return;
    }

    let catalog = Catalog::fixture();
    let suggestions = search_suggestions(catalog.all(), query);
    if suggestions.is_empty() {
        println!("No suggestions for \"{query}\"");
        return;
    }
    for suggestion in suggestions {
        println!("  {suggestion}");
    }
}
