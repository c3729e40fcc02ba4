use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use sportzone_core::envelope::Envelope;
use sportzone_core::serde::to_money;
use sportzone_domain::id::{ProductId, UserId};
use sportzone_domain::product::Category;

use crate::domain::types::ProductListing;
use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::cascade::DeleteProductUseCase;
use crate::usecase::catalog::{
    CreateProductUseCase, ListProductsUseCase, ProductInput, ProductStatsUseCase,
    UpdateProductUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "to_money")]
    pub price: Decimal,
    pub stock: i32,
    pub brand: Option<String>,
    pub category: Category,
    pub image: Option<String>,
    pub user_id: UserId,
    /// Name of the administrator who created the product.
    pub admin_name: Option<String>,
    #[serde(serialize_with = "sportzone_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<ProductListing> for ProductResponse {
    fn from(listing: ProductListing) -> Self {
        let p = listing.product;
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
            brand: p.brand,
            category: p.category,
            image: p.image,
            user_id: p.owner_id,
            admin_name: listing.owner_name,
            created_at: p.created_at,
        }
    }
}

fn listing_payload(listings: Vec<ProductListing>) -> serde_json::Value {
    let products: Vec<ProductResponse> = listings.into_iter().map(Into::into).collect();
    json!({ "products": products })
}

// ── GET /api/products ────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = ListProductsUseCase {
        repo: state.product_repo(),
    };
    let listings = usecase.execute(None).await?;
    Ok(Envelope::ok(listing_payload(listings)))
}

// ── GET /api/products/category/{category} ────────────────────────────────────

pub async fn list_products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = ListProductsUseCase {
        repo: state.product_repo(),
    };
    let listings = usecase.execute(Some(category.as_str())).await?;
    Ok(Envelope::ok(listing_payload(listings)))
}

// ── POST /api/products ───────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub brand: Option<String>,
    pub category: String,
    pub image: Option<String>,
}

impl From<ProductRequest> for ProductInput {
    fn from(body: ProductRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            price: body.price,
            stock: body.stock,
            brand: body.brand,
            category: body.category,
            image: body.image,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Administrator creating the product.
    pub user_id: UserId,
    #[serde(flatten)]
    pub product: ProductRequest,
}

#[derive(Serialize)]
pub struct CreatedProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(serialize_with = "to_money")]
    pub price: Decimal,
    pub category: Category,
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(body.user_id, body.product.into()).await?;
    let product = CreatedProduct {
        id: product.id,
        name: product.name,
        price: product.price,
        category: product.category,
    };
    Ok(Envelope::created(json!({ "product": product })).message("product created"))
}

// ── PUT /api/products/{id} ───────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductRequest>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    usecase.execute(id, body.into()).await?;
    Ok(Envelope::done("product updated"))
}

// ── DELETE /api/products/{id} ────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = DeleteProductUseCase {
        repo: state.product_repo(),
    };
    let report = usecase.execute(id).await?;
    let message = if report.order_references > 0 {
        format!(
            "product \"{}\" deleted together with {} order reference(s)",
            report.product_name, report.order_references
        )
    } else {
        format!("product \"{}\" deleted", report.product_name)
    };
    Ok(Envelope::ok(json!({
        "deleted": {
            "product": report.product_name,
            "orderReferences": report.order_references,
        }
    }))
    .message(message))
}

// ── GET /api/products/{id}/stats ─────────────────────────────────────────────

pub async fn product_stats(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = ProductStatsUseCase {
        repo: state.product_repo(),
    };
    let orders_using = usecase.execute(id).await?;
    Ok(Envelope::ok(json!({
        "stats": { "ordersUsing": orders_using, "canDelete": true }
    })))
}
