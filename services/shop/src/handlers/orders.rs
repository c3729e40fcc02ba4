use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use sportzone_core::envelope::Envelope;
use sportzone_core::serde::to_money;
use sportzone_domain::id::{OrderId, ProductId, UserId};
use sportzone_domain::order::{OrderItem, OrderStatus};

use crate::domain::types::{Order, OrderDetails, OrderSummary};
use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::order::{
    GetOrderDetailsUseCase, ListAllOrdersUseCase, ListUserOrdersUseCase, PlaceOrderInput,
    PlaceOrderUseCase, UpdateOrderStatusUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub date: NaiveDate,
    #[serde(serialize_with = "to_money")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub status_name: &'static str,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            date: order.date,
            total: order.total,
            status: order.status,
            status_name: order.status.display_name(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub user_id: UserId,
    /// `"Name (qty), Name (qty)"`.
    pub products: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        Self {
            order: OrderResponse::from(&summary.order),
            user_id: summary.order.user_id,
            products: summary.products,
            user_name: summary.user_name,
        }
    }
}

fn summaries_payload(summaries: Vec<OrderSummary>) -> serde_json::Value {
    let orders: Vec<OrderSummaryResponse> = summaries.into_iter().map(Into::into).collect();
    json!({ "orders": orders })
}

// ── POST /api/orders ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
}

pub async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = PlaceOrderUseCase {
        repo: state.order_repo(),
    };
    let order = usecase
        .execute(PlaceOrderInput {
            user_id: body.user_id,
            items: body.items,
        })
        .await?;
    Ok(Envelope::created(json!({ "order": OrderResponse::from(&order) })).message("order placed"))
}

// ── GET /api/orders/user/{user_id} ───────────────────────────────────────────

pub async fn list_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = ListUserOrdersUseCase {
        repo: state.order_repo(),
    };
    Ok(Envelope::ok(summaries_payload(usecase.execute(user_id).await?)))
}

// ── GET /api/orders ──────────────────────────────────────────────────────────

pub async fn list_all_orders(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = ListAllOrdersUseCase {
        repo: state.order_repo(),
    };
    Ok(Envelope::ok(summaries_payload(usecase.execute().await?)))
}

// ── GET /api/orders/{id} ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub product_id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub quantity: i32,
    #[serde(serialize_with = "to_money")]
    pub unit_price: Decimal,
    #[serde(serialize_with = "to_money")]
    pub subtotal: Decimal,
}

#[derive(Serialize)]
pub struct OrderOwner {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub user_id: UserId,
    pub user: OrderOwner,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderDetails> for OrderDetailResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            order: OrderResponse::from(&details.order),
            user_id: details.order.user_id,
            user: OrderOwner {
                name: details.user_name,
                email: details.user_email,
            },
            lines: details
                .lines
                .into_iter()
                .map(|line| OrderLineResponse {
                    subtotal: line.subtotal(),
                    product_id: line.product_id,
                    name: line.product_name,
                    description: line.description,
                    image: line.image,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
        }
    }
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = GetOrderDetailsUseCase {
        repo: state.order_repo(),
    };
    let details = usecase.execute(id).await?;
    Ok(Envelope::ok(
        json!({ "order": OrderDetailResponse::from(details) }),
    ))
}

// ── PUT /api/orders/{id}/status ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = UpdateOrderStatusUseCase {
        repo: state.order_repo(),
    };
    let change = usecase.execute(id, &body.status).await?;
    Ok(Envelope::ok(json!({
        "order": {
            "id": change.order_id,
            "previousStatus": change.previous,
            "newStatus": change.new,
            "statusName": change.new.display_name(),
        }
    }))
    .message(format!("order status updated to {}", change.new.display_name())))
}
