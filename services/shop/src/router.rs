use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use sportzone_core::envelope::route_not_found;
use sportzone_core::health::healthz;
use sportzone_core::middleware::{cors_layer, request_id_layer};

use crate::handlers::{
    auth::{login, register},
    health::readyz,
    orders::{get_order, list_all_orders, list_user_orders, place_order, update_order_status},
    products::{
        create_product, delete_product, list_products, list_products_by_category, product_stats,
        update_product,
    },
    users::{delete_user, list_users, update_user_role, user_stats},
};
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // Products
        .route("/products", get(list_products).post(create_product))
        .route("/products/category/{category}", get(list_products_by_category))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/products/{id}/stats", get(product_stats))
        // Users
        .route("/users", get(list_users))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/stats", get(user_stats))
        .route("/users/{id}/role", put(update_user_role))
        // Orders
        .route("/orders", get(list_all_orders).post(place_order))
        .route("/orders/user/{user_id}", get(list_user_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", put(update_order_status))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes())
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .layer(cors_layer())
        .with_state(state)
}
