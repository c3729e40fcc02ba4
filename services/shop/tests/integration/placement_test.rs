use sportzone_domain::cart::{Cart, CartUpdate};
use sportzone_domain::id::UserId;
use sportzone_domain::order::OrderStatus;
use sportzone_domain::user::UserRole;
use sportzone_shop::error::ShopServiceError;
use sportzone_shop::usecase::order::{PlaceOrderInput, PlaceOrderUseCase};
use sportzone_testing::fixture::{cart_product, item, money};

use crate::helpers::MemoryStore;

fn setup() -> (MemoryStore, UserId, UserId) {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let customer = store.add_user("Carla", UserRole::Customer);
    (store, admin, customer)
}

#[tokio::test]
async fn should_place_order_and_decrement_stock() {
    let (store, admin, customer) = setup();
    let ball = store.add_product(admin, "Ball", "10.00", 5);
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };

    let order = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: vec![item(ball.0, 3, "10.00")],
        })
        .await
        .unwrap();

    assert_eq!(order.total, money("30.00"));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(store.stock_of(ball), 2);
    let state = store.snapshot();
    assert_eq!(state.orders.len(), 1);
    assert_eq!(state.lines.len(), 1);
    assert_eq!(state.lines[0].unit_price, money("10.00"));
}

#[tokio::test]
async fn should_reject_order_exceeding_stock_without_side_effects() {
    let (store, admin, customer) = setup();
    let ball = store.add_product(admin, "Ball", "10.00", 2);
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };

    let result = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: vec![item(ball.0, 3, "10.00")],
        })
        .await;

    assert!(
        matches!(result, Err(ShopServiceError::InsufficientStock(id)) if id == ball),
        "expected InsufficientStock, got {result:?}"
    );
    assert_eq!(store.stock_of(ball), 2);
    let state = store.snapshot();
    assert!(state.orders.is_empty());
    assert!(state.lines.is_empty());
}

#[tokio::test]
async fn should_roll_back_earlier_decrements_when_later_item_is_short() {
    let (store, admin, customer) = setup();
    let ball = store.add_product(admin, "Ball", "10.00", 5);
    let net = store.add_product(admin, "Net", "25.00", 1);
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };

    let result = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: vec![item(ball.0, 2, "10.00"), item(net.0, 2, "25.00")],
        })
        .await;

    assert!(matches!(result, Err(ShopServiceError::InsufficientStock(id)) if id == net));
    assert_eq!(store.stock_of(ball), 5);
    assert_eq!(store.stock_of(net), 1);
    assert!(store.snapshot().orders.is_empty());
}

#[tokio::test]
async fn should_name_first_short_item_in_request_order() {
    let (store, admin, customer) = setup();
    let ball = store.add_product(admin, "Ball", "10.00", 0);
    let net = store.add_product(admin, "Net", "25.00", 0);
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };

    let result = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: vec![item(net.0, 1, "25.00"), item(ball.0, 1, "10.00")],
        })
        .await;

    assert!(matches!(result, Err(ShopServiceError::InsufficientStock(id)) if id == net));
}

#[tokio::test]
async fn should_decrement_repeated_product_lines_cumulatively() {
    let (store, admin, customer) = setup();
    let ball = store.add_product(admin, "Ball", "10.00", 3);
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };

    let result = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: vec![item(ball.0, 2, "10.00"), item(ball.0, 2, "10.00")],
        })
        .await;

    assert!(matches!(result, Err(ShopServiceError::InsufficientStock(_))));
    assert_eq!(store.stock_of(ball), 3);
}

#[tokio::test]
async fn should_reject_unknown_product_without_side_effects() {
    let (store, admin, customer) = setup();
    let ball = store.add_product(admin, "Ball", "10.00", 3);
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };

    let result = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: vec![item(ball.0, 1, "10.00"), item(999, 1, "1.00")],
        })
        .await;

    assert!(matches!(result, Err(ShopServiceError::ProductNotFound)));
    assert_eq!(store.stock_of(ball), 3);
    assert!(store.snapshot().orders.is_empty());
}

#[tokio::test]
async fn should_conserve_stock_across_many_placements() {
    let (store, admin, customer) = setup();
    let initial = 10;
    let ball = store.add_product(admin, "Ball", "4.50", initial);
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };

    let mut sold = 0;
    for quantity in [3, 4, 5, 2, 1, 1] {
        let placed = usecase
            .execute(PlaceOrderInput {
                user_id: customer,
                items: vec![item(ball.0, quantity, "4.50")],
            })
            .await;
        if placed.is_ok() {
            sold += quantity;
        }
        let stock = store.stock_of(ball);
        assert!(stock >= 0);
        assert_eq!(initial - sold, stock);
    }
    assert_eq!(sold, 10);
    assert_eq!(store.stock_of(ball), 0);
}

#[tokio::test]
async fn should_trust_client_price_captured_in_cart() {
    let (store, admin, customer) = setup();
    let ball = store.add_product(admin, "Ball", "12.00", 5);
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };

    let order = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: vec![item(ball.0, 2, "9.99")],
        })
        .await
        .unwrap();

    assert_eq!(order.total, money("19.98"));
    assert_eq!(store.snapshot().lines[0].unit_price, money("9.99"));
}

#[tokio::test]
async fn should_place_order_built_from_cart() {
    let (store, admin, customer) = setup();
    let ball = store.add_product(admin, "Ball", "10.00", 4);
    let net = store.add_product(admin, "Net", "25.50", 10);

    let mut cart = Cart::new();
    cart.add(cart_product(ball.0, "10.00", 4), 3);
    assert_eq!(
        cart.add(cart_product(ball.0, "10.00", 4), 3),
        CartUpdate::CappedAtStock { quantity: 4 }
    );
    cart.add(cart_product(net.0, "25.50", 10), 2);
    assert_eq!(cart.total(), money("91.00"));

    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };
    let order = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: cart.order_items(),
        })
        .await
        .unwrap();

    assert_eq!(order.total, cart.total());
    assert_eq!(store.stock_of(ball), 0);
    assert_eq!(store.stock_of(net), 8);
    assert_eq!(store.snapshot().lines.len(), 2);
}

#[tokio::test]
async fn should_reject_empty_cart() {
    let (store, _, customer) = setup();
    let usecase = PlaceOrderUseCase {
        repo: store.clone(),
    };
    let result = usecase
        .execute(PlaceOrderInput {
            user_id: customer,
            items: Cart::new().order_items(),
        })
        .await;
    assert!(matches!(result, Err(ShopServiceError::EmptyCart)));
    assert_eq!(store.snapshot().orders.len(), 0);
}
