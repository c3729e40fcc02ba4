use chrono::NaiveDate;

use sportzone_domain::id::OrderId;
use sportzone_domain::order::OrderStatus;
use sportzone_domain::user::UserRole;
use sportzone_shop::error::ShopServiceError;
use sportzone_shop::usecase::order::{
    GetOrderDetailsUseCase, ListAllOrdersUseCase, ListUserOrdersUseCase, UpdateOrderStatusUseCase,
};
use sportzone_testing::fixture::money;

use crate::helpers::{MemoryStore, seed_order};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
}

#[tokio::test]
async fn should_report_missing_order_on_status_change() {
    let store = MemoryStore::new();
    let result = UpdateOrderStatusUseCase {
        repo: store.clone(),
    }
    .execute(OrderId(99), "shipped")
    .await;
    assert!(matches!(result, Err(ShopServiceError::OrderNotFound)));
}

#[tokio::test]
async fn should_allow_any_status_transition() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let ball = store.add_product(admin, "Ball", "10.00", 5);
    let order = seed_order(&store, admin, day(1), &[(ball, 1, "10.00")]);
    let usecase = UpdateOrderStatusUseCase {
        repo: store.clone(),
    };

    let change = usecase.execute(order, "delivered").await.unwrap();
    assert_eq!(change.previous, OrderStatus::Pending);
    assert_eq!(change.new, OrderStatus::Delivered);

    let back = usecase.execute(order, "pending").await.unwrap();
    assert_eq!(back.previous, OrderStatus::Delivered);
    assert_eq!(store.snapshot().orders[&order].status, OrderStatus::Pending);
}

#[tokio::test]
async fn should_leave_order_untouched_on_unknown_status() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let ball = store.add_product(admin, "Ball", "10.00", 5);
    let order = seed_order(&store, admin, day(1), &[(ball, 1, "10.00")]);

    let result = UpdateOrderStatusUseCase {
        repo: store.clone(),
    }
    .execute(order, "lost")
    .await;

    assert!(matches!(result, Err(ShopServiceError::InvalidStatus)));
    assert_eq!(store.snapshot().orders[&order].status, OrderStatus::Pending);
}

#[tokio::test]
async fn should_list_user_orders_newest_first_with_summary() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let buyer = store.add_user("Buyer", UserRole::Customer);
    let ball = store.add_product(admin, "Ball", "10.00", 9);
    let net = store.add_product(admin, "Net", "20.00", 9);
    let older = seed_order(&store, buyer, day(1), &[(net, 1, "20.00")]);
    let newer = seed_order(&store, buyer, day(3), &[(ball, 2, "10.00"), (net, 1, "20.00")]);
    seed_order(&store, admin, day(2), &[(ball, 1, "10.00")]);

    let orders = ListUserOrdersUseCase {
        repo: store.clone(),
    }
    .execute(buyer)
    .await
    .unwrap();

    let ids: Vec<OrderId> = orders.iter().map(|o| o.order.id).collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(orders[0].products.as_deref(), Some("Ball (2), Net (1)"));
    assert_eq!(orders[0].order.total, money("40.00"));
    assert!(orders.iter().all(|o| o.user_name.is_none()));
}

#[tokio::test]
async fn should_order_same_day_orders_by_id() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let ball = store.add_product(admin, "Ball", "10.00", 9);
    let first = seed_order(&store, admin, day(5), &[(ball, 1, "10.00")]);
    let second = seed_order(&store, admin, day(5), &[(ball, 1, "10.00")]);

    let orders = ListUserOrdersUseCase {
        repo: store.clone(),
    }
    .execute(admin)
    .await
    .unwrap();

    let ids: Vec<OrderId> = orders.iter().map(|o| o.order.id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn should_list_all_orders_with_customer_names() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let buyer = store.add_user("Buyer", UserRole::Customer);
    let ball = store.add_product(admin, "Ball", "10.00", 9);
    seed_order(&store, buyer, day(1), &[(ball, 1, "10.00")]);
    seed_order(&store, admin, day(2), &[(ball, 4, "10.00")]);

    let orders = ListAllOrdersUseCase {
        repo: store.clone(),
    }
    .execute()
    .await
    .unwrap();

    let names: Vec<Option<&str>> = orders.iter().map(|o| o.user_name.as_deref()).collect();
    assert_eq!(names, vec![Some("Admin"), Some("Buyer")]);
    assert_eq!(orders[0].products.as_deref(), Some("Ball (4)"));
}

#[tokio::test]
async fn should_return_order_details_with_subtotals() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let buyer = store.add_user("Buyer", UserRole::Customer);
    let ball = store.add_product(admin, "Ball", "10.00", 9);
    let net = store.add_product(admin, "Net", "20.00", 9);
    let order = seed_order(&store, buyer, day(1), &[(ball, 3, "9.50"), (net, 1, "20.00")]);

    let details = GetOrderDetailsUseCase {
        repo: store.clone(),
    }
    .execute(order)
    .await
    .unwrap();

    assert_eq!(details.user_name, "Buyer");
    assert_eq!(details.user_email, "buyer@example.com");
    assert_eq!(details.order.total, money("48.50"));
    assert_eq!(details.lines.len(), 2);
    assert_eq!(details.lines[0].product_name, "Ball");
    assert_eq!(details.lines[0].subtotal(), money("28.50"));
    assert_eq!(details.lines[1].image.as_deref(), Some("net.png"));
}

#[tokio::test]
async fn should_report_missing_order_details() {
    let store = MemoryStore::new();
    let result = GetOrderDetailsUseCase {
        repo: store.clone(),
    }
    .execute(OrderId(5))
    .await;
    assert!(matches!(result, Err(ShopServiceError::OrderNotFound)));
}
