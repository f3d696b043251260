//! Static product catalog.
//!
//! The catalog is a fixed in-memory product list; nothing in the storefront
//! mutates it at runtime. Lookups are plain filters over the slice.

mod fixtures;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techstore_core::text::to_slug;
use techstore_core::{Category, ProductId};

/// Camera-specific specification block.
///
/// Only camera products carry this; other categories leave `specifications`
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSpecs {
    pub resolution: String,
    pub view_angle: String,
    pub rotation_vertical: String,
    pub rotation_horizontal: String,
    pub rotation_diagonal: String,
    pub night_vision: String,
    pub features: Vec<String>,
    pub two_way_audio: String,
}

/// A catalog product.
///
/// `price` and `original_price` are display strings; `price_number` is the
/// canonical amount (VND, no sub-units) used for every computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub original_price: String,
    pub image: String,
    pub images: Vec<String>,
    pub category: Category,
    pub rating: f32,
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_specs: Option<CameraSpecs>,
    pub reviews: u32,
    pub discount: String,
    pub price_number: i64,
    pub created_at: DateTime<Utc>,
    pub stock: u32,
}

impl Product {
    /// The URL slug derived from the product name.
    #[must_use]
    pub fn slug(&self) -> String {
        to_slug(&self.name)
    }
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in fixture catalog (15 products).
    #[must_use]
    pub fn fixture() -> Self {
        Self::new(fixtures::all_products())
    }

    /// All products in original order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products in the given category, in original order.
    #[must_use]
    pub fn by_category(&self, category: &Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| &p.category == category)
            .collect()
    }

    /// Find a product by its numeric id.
    #[must_use]
    pub fn by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Find a product by its name slug.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug() == slug)
    }

    /// Products related to `product`: same category, different id, capped at
    /// `limit`.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fixture()
    }
}
