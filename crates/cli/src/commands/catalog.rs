//! Catalog inspection commands.

use thiserror::Error;

use techstore_storefront::catalog::Catalog;

use super::format_vnd;

/// Catalog command errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no product with slug: {0}")]
    UnknownSlug(String),
}

/// Print every product in the fixture catalog.
pub fn list() {
    let catalog = Catalog::fixture();
    println!(
        "{:<4} {:<28} {:<10} {:>14} {:>6}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    for product in catalog.all() {
        println!(
            "{:<4} {:<28} {:<10} {:>14} {:>6}",
            product.id,
            product.name,
            product.category.as_str(),
            format_vnd(product.price_number),
            product.stock,
        );
    }
}

/// Print one product in detail, looked up by slug.
///
/// # Errors
///
/// Returns an error when no product carries the slug.
pub fn show(slug: &str) -> Result<(), CatalogError> {
    let catalog = Catalog::fixture();
    let product = catalog
        .by_slug(slug)
        .ok_or_else(|| CatalogError::UnknownSlug(slug.to_string()))?;

    println!("{} (#{})", product.name, product.id);
    println!("  slug:      {}", product.slug());
    println!("  category:  {}", product.category.as_str());
    println!(
        "  price:     {} (was {}, -{})",
        format_vnd(product.price_number),
        product.original_price,
        product.discount
    );
    println!("  rating:    {} ({} reviews)", product.rating, product.reviews);
    println!("  stock:     {}", product.stock);
    for line in &product.description {
        println!("  {line}");
    }
    if let Some(specs) = &product.camera_specs {
        println!("  camera:");
        println!("    resolution:   {}", specs.resolution);
        println!("    view angle:   {}", specs.view_angle);
        println!("    night vision: {}", specs.night_vision);
        for feature in &specs.features {
            println!("    - {feature}");
        }
    }

    let related = catalog.related(product, 4);
    if !related.is_empty() {
        println!("  related:");
        for r in related {
            println!("    {} ({})", r.name, format_vnd(r.price_number));
        }
    }
    Ok(())
}
