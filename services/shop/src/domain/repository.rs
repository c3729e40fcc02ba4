#![allow(async_fn_in_trait)]

use sportzone_domain::id::{OrderId, ProductId, UserId};
use sportzone_domain::order::OrderStatus;
use sportzone_domain::product::Category;
use sportzone_domain::user::UserRole;

use crate::domain::types::{
    NewOrder, NewUser, Order, OrderDetails, OrderSummary, Product, ProductDraft, ProductListing,
    User, UserStats,
};
use crate::error::ShopServiceError;

/// Repository for shop accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ShopServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ShopServiceError>;

    /// Insert a user. Fails with `UserExists` when the email is taken.
    async fn create(&self, user: &NewUser) -> Result<User, ShopServiceError>;

    /// All users, newest id first.
    async fn list(&self) -> Result<Vec<User>, ShopServiceError>;

    async fn count_administrators(&self) -> Result<u64, ShopServiceError>;

    /// Overwrite the role. Returns `false` if no user has `id`.
    async fn update_role(&self, id: UserId, role: UserRole) -> Result<bool, ShopServiceError>;

    /// Products and orders owned by the user.
    async fn stats(&self, id: UserId) -> Result<UserStats, ShopServiceError>;

    /// Atomically remove the user and everything that depends on it: lines,
    /// payments and orders of the user's orders, lines referencing the user's
    /// products, the products, then the user row.
    ///
    /// Returns `false` (and leaves the store untouched) if the user row was
    /// already gone.
    async fn delete_cascade(&self, id: UserId) -> Result<bool, ShopServiceError>;
}

/// Repository for the catalog and its stock ledger.
pub trait ProductRepository: Send + Sync {
    /// Catalog with creator names, newest id first; optionally one category.
    async fn list(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<ProductListing>, ShopServiceError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ShopServiceError>;

    /// Insert a product owned by `owner`. Fails with `UserNotFound` when the
    /// owner does not exist.
    async fn create(
        &self,
        owner: UserId,
        draft: &ProductDraft,
    ) -> Result<Product, ShopServiceError>;

    /// Overwrite every editable field, stock included. Returns `false` if no
    /// product has `id`.
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<bool, ShopServiceError>;

    async fn count_order_references(&self, id: ProductId) -> Result<u64, ShopServiceError>;

    /// Atomically delete the order lines referencing the product, then the
    /// product. Returns the number of lines removed, or `None` (nothing
    /// removed) if the product row was already gone.
    async fn delete_with_lines(&self, id: ProductId) -> Result<Option<u64>, ShopServiceError>;
}

/// Repository for orders and their lines.
pub trait OrderRepository: Send + Sync {
    /// Atomically insert the order and its lines, then decrement stock item by
    /// item in request order. The first item whose stock is short aborts the
    /// whole placement with `InsufficientStock`.
    async fn place(&self, order: &NewOrder) -> Result<Order, ShopServiceError>;

    /// Overwrite the status. Returns the previous status, or `None` if no
    /// order has `id`.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<OrderStatus>, ShopServiceError>;

    /// The user's orders, newest date first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<OrderSummary>, ShopServiceError>;

    /// Every order with its owner's name, newest date first.
    async fn list_all(&self) -> Result<Vec<OrderSummary>, ShopServiceError>;

    async fn details(&self, id: OrderId) -> Result<Option<OrderDetails>, ShopServiceError>;
}
