//! Client-side shopping cart.
//!
//! The cart lives with the client until checkout; the server never stores it.
//! Quantities are capped at the stock the client last saw, but the store's
//! compare-and-decrement at placement time is what actually prevents
//! overselling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::ProductId;
use crate::order::OrderItem;

/// Catalog data the cart keeps for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product: CartProduct,
    pub quantity: i32,
}

/// What a cart mutation did, so the client can tell the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    Added { quantity: i32 },
    Updated { quantity: i32 },
    /// The requested quantity exceeded stock; the entry now holds all of it.
    CappedAtStock { quantity: i32 },
    Removed,
    OutOfStock,
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add `quantity` units, merging with an existing entry for the same product.
    pub fn add(&mut self, product: CartProduct, quantity: i32) -> CartUpdate {
        if quantity <= 0 {
            return CartUpdate::Unchanged;
        }
        let stock = product.stock.max(0);
        if let Some(entry) = self.entry_mut(product.product_id) {
            let wanted = entry.quantity.saturating_add(quantity);
            entry.product = product;
            if wanted > stock {
                entry.quantity = stock;
                return CartUpdate::CappedAtStock { quantity: stock };
            }
            entry.quantity = wanted;
            return CartUpdate::Updated { quantity: wanted };
        }

        if stock == 0 {
            return CartUpdate::OutOfStock;
        }
        let (quantity, update) = if quantity > stock {
            (stock, CartUpdate::CappedAtStock { quantity: stock })
        } else {
            (quantity, CartUpdate::Added { quantity })
        };
        self.entries.push(CartEntry { product, quantity });
        update
    }

    pub fn remove(&mut self, product_id: ProductId) -> CartUpdate {
        let before = self.entries.len();
        self.entries.retain(|e| e.product.product_id != product_id);
        if self.entries.len() < before {
            CartUpdate::Removed
        } else {
            CartUpdate::Unchanged
        }
    }

    /// Set the quantity of an entry. Zero or less removes it.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i32) -> CartUpdate {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let Some(entry) = self.entry_mut(product_id) else {
            return CartUpdate::Unchanged;
        };
        let stock = entry.product.stock.max(0);
        if quantity > stock {
            entry.quantity = stock;
            CartUpdate::CappedAtStock { quantity: stock }
        } else {
            entry.quantity = quantity;
            CartUpdate::Updated { quantity }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .map(|e| Decimal::from(e.quantity) * e.product.unit_price)
            .sum()
    }

    /// Number of units across all entries.
    pub fn item_count(&self) -> i32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries
            .iter()
            .any(|e| e.product.product_id == product_id)
    }

    pub fn quantity_of(&self, product_id: ProductId) -> i32 {
        self.entries
            .iter()
            .find(|e| e.product.product_id == product_id)
            .map_or(0, |e| e.quantity)
    }

    /// Lines to submit for order placement, in the order they were added.
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.entries
            .iter()
            .filter(|e| e.quantity > 0)
            .map(|e| OrderItem {
                product_id: e.product.product_id,
                quantity: e.quantity,
                unit_price: e.product.unit_price,
            })
            .collect()
    }

    fn entry_mut(&mut self, product_id: ProductId) -> Option<&mut CartEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.product.product_id == product_id)
    }
}
