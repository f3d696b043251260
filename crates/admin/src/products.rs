//! Product administration over a local catalog copy.
//!
//! The editor clones the fixture catalog once and applies creates, updates
//! and deletes to that copy only. The storefront's catalog is never touched;
//! edits live for the editor's lifetime, exactly like the mock back office
//! this models.

use techstore_core::ProductId;
use techstore_storefront::catalog::{Catalog, Product};

/// A mutable working copy of the catalog.
#[derive(Debug, Clone)]
pub struct ProductEditor {
    products: Vec<Product>,
}

impl ProductEditor {
    /// Start from a snapshot of `catalog`.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            products: catalog.all().to_vec(),
        }
    }

    /// The working copy, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Add `product` under a freshly assigned id, returning it.
    pub fn create(&mut self, mut product: Product) -> ProductId {
        let next = self
            .products
            .iter()
            .map(|p| p.id.as_i32())
            .max()
            .unwrap_or(0)
            + 1;
        product.id = ProductId::new(next);
        let id = product.id;
        self.products.push(product);
        tracing::debug!(%id, "product created");
        id
    }

    /// Replace the product with `product.id`. Returns `false` when absent.
    pub fn update(&mut self, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// Delete the product with `id`. Returns `false` when absent.
    pub fn delete(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }
}
