use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sportzone_core::envelope::failure;
use sportzone_domain::id::ProductId;

/// Shop service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ShopServiceError {
    #[error("a user with this email already exists")]
    UserExists,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("product not found")]
    ProductNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("cannot remove the last administrator")]
    LastAdmin,
    #[error("invalid role")]
    InvalidRole,
    #[error("invalid order status")]
    InvalidStatus,
    #[error("invalid category")]
    InvalidCategory,
    #[error("invalid product")]
    InvalidProduct,
    #[error("insufficient stock for product {0}")]
    InsufficientStock(ProductId),
    #[error("cart is empty")]
    EmptyCart,
    #[error("quantity must be greater than zero")]
    InvalidQuantity,
    #[error("unit price must not be negative")]
    InvalidPrice,
    #[error("database error")]
    Internal(#[from] anyhow::Error),
}

impl ShopServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserExists => "USER_EXISTS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::LastAdmin => "LAST_ADMIN_ERROR",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidStatus => "INVALID_STATE",
            Self::InvalidCategory => "INVALID_CATEGORY",
            Self::InvalidProduct => "INVALID_PRODUCT",
            Self::InsufficientStock(_) => "STOCK_ERROR",
            Self::EmptyCart => "EMPTY_CART",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::Internal(_) => "DATABASE_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound | Self::ProductNotFound | Self::OrderNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UserExists => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::LastAdmin
            | Self::InvalidRole
            | Self::InvalidStatus
            | Self::InvalidCategory
            | Self::InvalidProduct
            | Self::InsufficientStock(_)
            | Self::EmptyCart
            | Self::InvalidQuantity
            | Self::InvalidPrice => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ShopServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "DATABASE_ERROR", "internal error");
        }
        failure(self.status(), self.kind(), &self)
    }
}
