use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionError, TransactionTrait,
    sea_query::{Expr, Query},
};

use sportzone_domain::id::{OrderId, ProductId, UserId};
use sportzone_domain::order::OrderStatus;
use sportzone_domain::product::Category;
use sportzone_domain::user::UserRole;
use sportzone_shop_schema::{order_lines, orders, payments, products, users};

use crate::domain::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::domain::types::{
    NewOrder, NewUser, Order, OrderDetails, OrderLineDetail, OrderSummary, Product, ProductDraft,
    ProductListing, User, UserStats, summarize_lines,
};
use crate::error::ShopServiceError;

/// Reasons a transaction body stops early. Every variant rolls back.
#[derive(Debug, thiserror::Error)]
enum TxnAbort {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error("insufficient stock for product {0}")]
    InsufficientStock(ProductId),
    #[error("product {0} does not exist")]
    UnknownProduct(ProductId),
    #[error("user does not exist")]
    UnknownUser,
    #[error("target row is gone")]
    Missing,
}

fn txn_error(err: TransactionError<TxnAbort>, context: &'static str) -> ShopServiceError {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(TxnAbort::Db(e)) => {
            ShopServiceError::Internal(anyhow::Error::new(e).context(context))
        }
        TransactionError::Transaction(TxnAbort::InsufficientStock(id)) => {
            ShopServiceError::InsufficientStock(id)
        }
        TransactionError::Transaction(TxnAbort::UnknownProduct(_)) => {
            ShopServiceError::ProductNotFound
        }
        TransactionError::Transaction(TxnAbort::UnknownUser) => ShopServiceError::UserNotFound,
        TransactionError::Transaction(TxnAbort::Missing) => {
            ShopServiceError::Internal(anyhow::anyhow!("{context}: target row is gone"))
        }
    }
}

fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ShopServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ShopServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, ShopServiceError> {
        let model = users::ActiveModel {
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            address: Set(user.address.clone()),
            phone: Set(user.phone.clone()),
            role: Set(user.role.as_str().to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ShopServiceError::UserExists,
            _ => ShopServiceError::Internal(anyhow::Error::new(e).context("create user")),
        })?;
        user_from_model(model)
    }

    async fn list(&self) -> Result<Vec<User>, ShopServiceError> {
        users::Entity::find()
            .order_by_desc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?
            .into_iter()
            .map(user_from_model)
            .collect()
    }

    async fn count_administrators(&self) -> Result<u64, ShopServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Administrator.as_str()))
            .count(&self.db)
            .await
            .context("count administrators")?;
        Ok(count)
    }

    async fn update_role(&self, id: UserId, role: UserRole) -> Result<bool, ShopServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Role, Expr::value(role.as_str()))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update user role")?;
        Ok(result.rows_affected > 0)
    }

    async fn stats(&self, id: UserId) -> Result<UserStats, ShopServiceError> {
        let products = products::Entity::find()
            .filter(products::Column::UserId.eq(id.0))
            .count(&self.db)
            .await
            .context("count user products")?;
        let orders = orders::Entity::find()
            .filter(orders::Column::UserId.eq(id.0))
            .count(&self.db)
            .await
            .context("count user orders")?;
        Ok(UserStats { products, orders })
    }

    async fn delete_cascade(&self, id: UserId) -> Result<bool, ShopServiceError> {
        let user_id = id.0;
        let result = self
            .db
            .transaction::<_, (), TxnAbort>(|txn| {
                Box::pin(async move {
                    let user_orders = Query::select()
                        .column(orders::Column::Id)
                        .from(orders::Entity)
                        .and_where(Expr::col(orders::Column::UserId).eq(user_id))
                        .to_owned();
                    let user_products = Query::select()
                        .column(products::Column::Id)
                        .from(products::Entity)
                        .and_where(Expr::col(products::Column::UserId).eq(user_id))
                        .to_owned();

                    order_lines::Entity::delete_many()
                        .filter(order_lines::Column::OrderId.in_subquery(user_orders.clone()))
                        .exec(txn)
                        .await?;
                    payments::Entity::delete_many()
                        .filter(payments::Column::OrderId.in_subquery(user_orders))
                        .exec(txn)
                        .await?;
                    orders::Entity::delete_many()
                        .filter(orders::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    // Lines in other customers' orders that point at this user's products.
                    order_lines::Entity::delete_many()
                        .filter(order_lines::Column::ProductId.in_subquery(user_products))
                        .exec(txn)
                        .await?;
                    products::Entity::delete_many()
                        .filter(products::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;
                    let deleted = users::Entity::delete_by_id(user_id).exec(txn).await?;
                    if deleted.rows_affected == 0 {
                        return Err(TxnAbort::Missing);
                    }
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(true),
            Err(TransactionError::Transaction(TxnAbort::Missing)) => Ok(false),
            Err(e) => Err(txn_error(e, "delete user cascade")),
        }
    }
}

fn user_from_model(model: users::Model) -> Result<User, ShopServiceError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has an unreadable role", model.id))?;
    Ok(User {
        id: UserId(model.id),
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        address: model.address,
        phone: model.phone,
        role,
        created_at: model.created_at,
    })
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn list(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<ProductListing>, ShopServiceError> {
        let mut query = products::Entity::find().find_also_related(users::Entity);
        if let Some(category) = category {
            query = query.filter(products::Column::Category.eq(category.as_str()));
        }
        query
            .order_by_desc(products::Column::Id)
            .all(&self.db)
            .await
            .context("list products")?
            .into_iter()
            .map(|(product, owner)| {
                Ok(ProductListing {
                    product: product_from_model(product)?,
                    owner_name: owner.map(|u| u.name),
                })
            })
            .collect()
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ShopServiceError> {
        let model = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find product by id")?;
        model.map(product_from_model).transpose()
    }

    async fn create(
        &self,
        owner: UserId,
        draft: &ProductDraft,
    ) -> Result<Product, ShopServiceError> {
        let mut am = draft_active_model(draft);
        am.user_id = Set(owner.0);
        am.created_at = Set(Utc::now());
        let model = am.insert(&self.db).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                ShopServiceError::UserNotFound
            } else {
                ShopServiceError::Internal(anyhow::Error::new(e).context("create product"))
            }
        })?;
        product_from_model(model)
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<bool, ShopServiceError> {
        let result = products::Entity::update_many()
            .set(draft_active_model(draft))
            .filter(products::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update product")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_order_references(&self, id: ProductId) -> Result<u64, ShopServiceError> {
        let count = order_lines::Entity::find()
            .filter(order_lines::Column::ProductId.eq(id.0))
            .count(&self.db)
            .await
            .context("count product order references")?;
        Ok(count)
    }

    async fn delete_with_lines(&self, id: ProductId) -> Result<Option<u64>, ShopServiceError> {
        let product_id = id.0;
        let result = self
            .db
            .transaction::<_, u64, TxnAbort>(|txn| {
                Box::pin(async move {
                    let lines = order_lines::Entity::delete_many()
                        .filter(order_lines::Column::ProductId.eq(product_id))
                        .exec(txn)
                        .await?;
                    let deleted = products::Entity::delete_by_id(product_id).exec(txn).await?;
                    if deleted.rows_affected == 0 {
                        return Err(TxnAbort::Missing);
                    }
                    Ok(lines.rows_affected)
                })
            })
            .await;
        match result {
            Ok(lines) => Ok(Some(lines)),
            Err(TransactionError::Transaction(TxnAbort::Missing)) => Ok(None),
            Err(e) => Err(txn_error(e, "delete product cascade")),
        }
    }
}

fn draft_active_model(draft: &ProductDraft) -> products::ActiveModel {
    products::ActiveModel {
        name: Set(draft.name.clone()),
        description: Set(draft.description.clone()),
        price: Set(draft.price),
        stock: Set(draft.stock),
        brand: Set(draft.brand.clone()),
        category: Set(draft.category.as_str().to_owned()),
        image: Set(draft.image.clone()),
        ..Default::default()
    }
}

fn product_from_model(model: products::Model) -> Result<Product, ShopServiceError> {
    let category = model
        .category
        .parse::<Category>()
        .with_context(|| format!("product {} has an unreadable category", model.id))?;
    Ok(Product {
        id: ProductId(model.id),
        name: model.name,
        description: model.description,
        price: model.price,
        stock: model.stock,
        brand: model.brand,
        category,
        image: model.image,
        owner_id: UserId(model.user_id),
        created_at: model.created_at,
    })
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl DbOrderRepository {
    /// Product summary per order id, lines in insertion order.
    async fn summaries(
        &self,
        order_ids: Vec<i32>,
    ) -> Result<HashMap<i32, String>, ShopServiceError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = order_lines::Entity::find()
            .filter(order_lines::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_lines::Column::Id)
            .find_also_related(products::Entity)
            .all(&self.db)
            .await
            .context("load order lines")?;

        let mut grouped: HashMap<i32, Vec<(String, i32)>> = HashMap::new();
        for (line, product) in rows {
            let name = product.map(|p| p.name).unwrap_or_default();
            grouped
                .entry(line.order_id)
                .or_default()
                .push((name, line.quantity));
        }
        Ok(grouped
            .into_iter()
            .filter_map(|(order_id, lines)| {
                summarize_lines(lines.iter().map(|(name, qty)| (name.as_str(), *qty)))
                    .map(|summary| (order_id, summary))
            })
            .collect())
    }
}

impl OrderRepository for DbOrderRepository {
    async fn place(&self, order: &NewOrder) -> Result<Order, ShopServiceError> {
        let order = order.clone();
        let model = self
            .db
            .transaction::<_, orders::Model, TxnAbort>(|txn| {
                Box::pin(async move {
                    let placed = orders::ActiveModel {
                        date: Set(order.date),
                        status: Set(OrderStatus::Pending.as_str().to_owned()),
                        total: Set(order.total),
                        user_id: Set(order.user_id.0),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| {
                        if is_foreign_key_violation(&e) {
                            TxnAbort::UnknownUser
                        } else {
                            TxnAbort::Db(e)
                        }
                    })?;

                    for item in &order.items {
                        order_lines::ActiveModel {
                            order_id: Set(placed.id),
                            product_id: Set(item.product_id.0),
                            quantity: Set(item.quantity),
                            unit_price: Set(item.unit_price),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await
                        .map_err(|e| {
                            if is_foreign_key_violation(&e) {
                                TxnAbort::UnknownProduct(item.product_id)
                            } else {
                                TxnAbort::Db(e)
                            }
                        })?;
                    }

                    for item in &order.items {
                        let decremented = products::Entity::update_many()
                            .col_expr(
                                products::Column::Stock,
                                Expr::col(products::Column::Stock).sub(item.quantity),
                            )
                            .filter(products::Column::Id.eq(item.product_id.0))
                            .filter(products::Column::Stock.gte(item.quantity))
                            .exec(txn)
                            .await?;
                        if decremented.rows_affected == 0 {
                            return Err(TxnAbort::InsufficientStock(item.product_id));
                        }
                    }
                    Ok(placed)
                })
            })
            .await
            .map_err(|e| txn_error(e, "place order"))?;
        order_from_model(model)
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<OrderStatus>, ShopServiceError> {
        let Some(current) = orders::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find order by id")?
        else {
            return Ok(None);
        };
        let previous = order_from_model(current)?.status;
        let result = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(status.as_str()))
            .filter(orders::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update order status")?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(previous))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<OrderSummary>, ShopServiceError> {
        let models = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id.0))
            .order_by_desc(orders::Column::Date)
            .order_by_desc(orders::Column::Id)
            .all(&self.db)
            .await
            .context("list user orders")?;
        let mut summaries = self.summaries(models.iter().map(|o| o.id).collect()).await?;
        models
            .into_iter()
            .map(|model| {
                let products = summaries.remove(&model.id);
                Ok(OrderSummary {
                    order: order_from_model(model)?,
                    products,
                    user_name: None,
                })
            })
            .collect()
    }

    async fn list_all(&self) -> Result<Vec<OrderSummary>, ShopServiceError> {
        let rows = orders::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(orders::Column::Date)
            .order_by_desc(orders::Column::Id)
            .all(&self.db)
            .await
            .context("list all orders")?;
        let mut summaries = self
            .summaries(rows.iter().map(|(o, _)| o.id).collect())
            .await?;
        rows.into_iter()
            .map(|(model, owner)| {
                let products = summaries.remove(&model.id);
                Ok(OrderSummary {
                    order: order_from_model(model)?,
                    products,
                    user_name: owner.map(|u| u.name),
                })
            })
            .collect()
    }

    async fn details(&self, id: OrderId) -> Result<Option<OrderDetails>, ShopServiceError> {
        let Some((model, owner)) = orders::Entity::find_by_id(id.0)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find order details")?
        else {
            return Ok(None);
        };
        let lines = order_lines::Entity::find()
            .filter(order_lines::Column::OrderId.eq(id.0))
            .order_by_asc(order_lines::Column::Id)
            .find_also_related(products::Entity)
            .all(&self.db)
            .await
            .context("load order detail lines")?
            .into_iter()
            .map(|(line, product)| {
                let (product_name, description, image) = product
                    .map(|p| (p.name, p.description, p.image))
                    .unwrap_or_default();
                OrderLineDetail {
                    product_id: ProductId(line.product_id),
                    product_name,
                    description,
                    image,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                }
            })
            .collect();
        let (user_name, user_email) = owner.map(|u| (u.name, u.email)).unwrap_or_default();
        Ok(Some(OrderDetails {
            order: order_from_model(model)?,
            user_name,
            user_email,
            lines,
        }))
    }
}

fn order_from_model(model: orders::Model) -> Result<Order, ShopServiceError> {
    let status = model
        .status
        .parse::<OrderStatus>()
        .with_context(|| format!("order {} has an unreadable status", model.id))?;
    Ok(Order {
        id: OrderId(model.id),
        date: model.date,
        status,
        total: model.total,
        user_id: UserId(model.user_id),
    })
}
