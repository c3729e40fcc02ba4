use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use sportzone_domain::id::{OrderId, UserId};
use sportzone_domain::order::{OrderItem, OrderStatus, order_total};

use crate::domain::repository::OrderRepository;
use crate::domain::types::{NewOrder, Order, OrderDetails, OrderSummary, StatusChange};
use crate::error::ShopServiceError;

// ── PlaceOrder ───────────────────────────────────────────────────────────────

pub struct PlaceOrderInput {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
}

pub struct PlaceOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> PlaceOrderUseCase<R> {
    /// Turn a cart into a pending order. Nothing is written unless every line
    /// is valid and every product has enough stock.
    pub async fn execute(&self, input: PlaceOrderInput) -> Result<Order, ShopServiceError> {
        validate_items(&input.items)?;
        let order = NewOrder {
            user_id: input.user_id,
            date: Utc::now().date_naive(),
            total: order_total(&input.items),
            items: input.items,
        };
        let placed = self.repo.place(&order).await?;
        info!(
            order_id = %placed.id,
            user_id = %placed.user_id,
            total = %placed.total,
            lines = order.items.len(),
            "order placed"
        );
        Ok(placed)
    }
}

fn validate_items(items: &[OrderItem]) -> Result<(), ShopServiceError> {
    if items.is_empty() {
        return Err(ShopServiceError::EmptyCart);
    }
    if items.iter().any(|item| item.quantity <= 0) {
        return Err(ShopServiceError::InvalidQuantity);
    }
    if items.iter().any(|item| item.unit_price < Decimal::ZERO) {
        return Err(ShopServiceError::InvalidPrice);
    }
    Ok(())
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

pub struct UpdateOrderStatusUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> UpdateOrderStatusUseCase<R> {
    pub async fn execute(
        &self,
        order_id: OrderId,
        status: &str,
    ) -> Result<StatusChange, ShopServiceError> {
        let new: OrderStatus = status
            .parse()
            .map_err(|_| ShopServiceError::InvalidStatus)?;
        let previous = self
            .repo
            .update_status(order_id, new)
            .await?
            .ok_or(ShopServiceError::OrderNotFound)?;
        info!(%order_id, from = %previous, to = %new, "order status changed");
        Ok(StatusChange {
            order_id,
            previous,
            new,
        })
    }
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub struct ListUserOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListUserOrdersUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<Vec<OrderSummary>, ShopServiceError> {
        self.repo.list_for_user(user_id).await
    }
}

pub struct ListAllOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListAllOrdersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<OrderSummary>, ShopServiceError> {
        self.repo.list_all().await
    }
}

pub struct GetOrderDetailsUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> GetOrderDetailsUseCase<R> {
    pub async fn execute(&self, order_id: OrderId) -> Result<OrderDetails, ShopServiceError> {
        self.repo
            .details(order_id)
            .await?
            .ok_or(ShopServiceError::OrderNotFound)
    }
}
