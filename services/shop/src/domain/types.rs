use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use sportzone_domain::id::{OrderId, ProductId, UserId};
use sportzone_domain::order::{OrderItem, OrderStatus};
use sportzone_domain::product::Category;
use sportzone_domain::user::UserRole;

/// Shop account. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Fields of a user about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub brand: Option<String>,
    pub category: Category,
    pub image: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Catalog row with the name of the administrator who created it.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub product: Product,
    pub owner_name: Option<String>,
}

/// Editable product fields, shared by create and update.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub brand: Option<String>,
    pub category: Category,
    pub image: Option<String>,
}

impl ProductDraft {
    /// A product needs a name, a non-negative price and non-negative stock.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.price >= Decimal::ZERO && self.stock >= 0
    }
}

/// A validated order request, ready to be placed.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub total: Decimal,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub total: Decimal,
    pub user_id: UserId,
}

/// Order row in a listing, with its product summary.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub order: Order,
    /// `"Name (qty), Name (qty)"` in line order; `None` when the order has no lines.
    pub products: Option<String>,
    /// Set only in the all-orders view.
    pub user_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrderLineDetail {
    pub product_id: ProductId,
    pub product_name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderLineDetail {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub user_name: String,
    pub user_email: String,
    pub lines: Vec<OrderLineDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub order_id: OrderId,
    pub previous: OrderStatus,
    pub new: OrderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    pub products: u64,
    pub orders: u64,
}

/// What a product cascade removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDeletion {
    pub product_name: String,
    pub order_references: u64,
}

/// What a user cascade removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDeletion {
    pub user_name: String,
    pub products: u64,
    pub orders: u64,
}

/// Render `(name, quantity)` pairs as `"Name (qty), Name (qty)"`.
pub fn summarize_lines<'a, I>(lines: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    let parts: Vec<String> = lines
        .into_iter()
        .map(|(name, quantity)| format!("{name} ({quantity})"))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
