//! Domain fixture builders.

use rust_decimal::Decimal;
use sportzone_domain::cart::CartProduct;
use sportzone_domain::id::ProductId;
use sportzone_domain::order::OrderItem;

/// Parse a money literal such as `"10.00"`.
///
/// Panics on malformed input.
pub fn money(amount: &str) -> Decimal {
    amount
        .parse()
        .unwrap_or_else(|e| panic!("invalid money literal {amount:?}: {e}"))
}

/// An order line for `product` at `unit_price`.
pub fn item(product: i32, quantity: i32, unit_price: &str) -> OrderItem {
    OrderItem {
        product_id: ProductId(product),
        quantity,
        unit_price: money(unit_price),
    }
}

/// A cart product named after its id.
pub fn cart_product(product: i32, unit_price: &str, stock: i32) -> CartProduct {
    CartProduct {
        product_id: ProductId(product),
        name: format!("product-{product}"),
        unit_price: money(unit_price),
        stock,
    }
}
