use chrono::NaiveDate;

use sportzone_domain::id::{ProductId, UserId};
use sportzone_domain::user::UserRole;
use sportzone_shop::domain::types::{ProductDeletion, UserDeletion};
use sportzone_shop::error::ShopServiceError;
use sportzone_shop::usecase::cascade::{DeleteProductUseCase, DeleteUserUseCase};
use sportzone_shop::usecase::user::{UpdateUserRoleUseCase, UserStatsUseCase};

use crate::helpers::{MemoryStore, seed_order};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

// ── user cascade ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_remove_user_with_products_orders_lines_and_payments() {
    let store = MemoryStore::new();
    let _admin = store.add_user("Admin", UserRole::Administrator);
    let seller = store.add_user("Seller", UserRole::Administrator);
    let ball = store.add_product(seller, "Ball", "10.00", 9);
    let net = store.add_product(seller, "Net", "20.00", 9);
    let order = seed_order(
        &store,
        seller,
        day(1),
        &[(ball, 1, "10.00"), (net, 1, "20.00"), (ball, 2, "10.00")],
    );
    store.add_payment(order, "60.00");

    let stats = UserStatsUseCase {
        repo: store.clone(),
    }
    .execute(seller)
    .await
    .unwrap();
    assert_eq!((stats.products, stats.orders), (2, 1));

    let usecase = DeleteUserUseCase {
        repo: store.clone(),
    };
    let report = usecase.execute(seller).await.unwrap();

    assert_eq!(
        report,
        UserDeletion {
            user_name: "Seller".into(),
            products: 2,
            orders: 1,
        }
    );
    let state = store.snapshot();
    assert!(!state.users.contains_key(&seller));
    assert!(state.products.values().all(|p| p.owner_id != seller));
    assert!(state.orders.is_empty());
    assert!(state.lines.is_empty());
    assert!(state.payments.is_empty());
}

#[tokio::test]
async fn should_remove_other_customers_lines_for_deleted_users_products() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let seller = store.add_user("Seller", UserRole::Administrator);
    let buyer = store.add_user("Buyer", UserRole::Customer);
    let ball = store.add_product(seller, "Ball", "10.00", 9);
    let bat = store.add_product(admin, "Bat", "15.00", 9);
    let order = seed_order(&store, buyer, day(2), &[(ball, 1, "10.00"), (bat, 1, "15.00")]);

    DeleteUserUseCase {
        repo: store.clone(),
    }
    .execute(seller)
    .await
    .unwrap();

    let state = store.snapshot();
    assert!(state.orders.contains_key(&order));
    assert_eq!(state.lines.len(), 1);
    assert_eq!(state.lines[0].product_id, bat);
    assert!(state.lines.iter().all(|l| state.products.contains_key(&l.product_id)));
}

#[tokio::test]
async fn should_keep_sole_administrator() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    store.add_product(admin, "Ball", "10.00", 1);

    let result = DeleteUserUseCase {
        repo: store.clone(),
    }
    .execute(admin)
    .await;

    assert!(matches!(result, Err(ShopServiceError::LastAdmin)));
    let state = store.snapshot();
    assert!(state.users.contains_key(&admin));
    assert_eq!(state.products.len(), 1);
}

#[tokio::test]
async fn should_report_missing_user_on_delete() {
    let store = MemoryStore::new();
    store.add_user("Admin", UserRole::Administrator);
    let result = DeleteUserUseCase {
        repo: store.clone(),
    }
    .execute(UserId(404))
    .await;
    assert!(matches!(result, Err(ShopServiceError::UserNotFound)));
}

// ── role changes ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refuse_to_demote_sole_administrator() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);

    let result = UpdateUserRoleUseCase {
        repo: store.clone(),
    }
    .execute(admin, "customer")
    .await;

    assert!(matches!(result, Err(ShopServiceError::LastAdmin)));
    assert_eq!(store.role_of(admin), UserRole::Administrator);
}

#[tokio::test]
async fn should_always_keep_an_administrator() {
    let store = MemoryStore::new();
    let a = store.add_user("Ana", UserRole::Administrator);
    let b = store.add_user("Beto", UserRole::Customer);
    let c = store.add_user("Cris", UserRole::Customer);
    let roles = UpdateUserRoleUseCase {
        repo: store.clone(),
    };
    let deletes = DeleteUserUseCase {
        repo: store.clone(),
    };

    enum Step {
        Role(UserId, &'static str),
        Delete(UserId),
    }
    let steps = [
        Step::Role(b, "administrator"),
        Step::Role(a, "customer"),
        Step::Delete(b),
        Step::Role(c, "administrator"),
        Step::Delete(c),
        Step::Delete(a),
        Step::Role(c, "customer"),
        Step::Delete(c),
    ];

    for step in steps {
        let _ = match step {
            Step::Role(id, role) => roles.execute(id, role).await.map(|_| ()),
            Step::Delete(id) => deletes.execute(id).await.map(|_| ()),
        };
        let state = store.snapshot();
        let administrators = state
            .users
            .values()
            .filter(|u| u.role.is_administrator())
            .count();
        assert!(administrators >= 1, "no administrator left");
    }
}

// ── product cascade ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_remove_product_and_its_order_lines() {
    let store = MemoryStore::new();
    let admin = store.add_user("Admin", UserRole::Administrator);
    let buyer = store.add_user("Buyer", UserRole::Customer);
    let ball = store.add_product(admin, "Ball", "10.00", 9);
    let net = store.add_product(admin, "Net", "20.00", 9);
    let first = seed_order(&store, buyer, day(1), &[(ball, 1, "10.00"), (net, 1, "20.00")]);
    seed_order(&store, buyer, day(2), &[(ball, 3, "10.00")]);

    let report = DeleteProductUseCase {
        repo: store.clone(),
    }
    .execute(ball)
    .await
    .unwrap();

    assert_eq!(
        report,
        ProductDeletion {
            product_name: "Ball".into(),
            order_references: 2,
        }
    );
    let state = store.snapshot();
    assert!(!state.products.contains_key(&ball));
    assert!(state.lines.iter().all(|l| l.product_id != ball));
    assert_eq!(state.orders.len(), 2);
    assert!(state.orders.contains_key(&first));
}

#[tokio::test]
async fn should_report_missing_product_on_delete() {
    let store = MemoryStore::new();
    let result = DeleteProductUseCase {
        repo: store.clone(),
    }
    .execute(ProductId(77))
    .await;
    assert!(matches!(result, Err(ShopServiceError::ProductNotFound)));
}
