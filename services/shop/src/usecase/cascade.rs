//! Cascading removal of products and users.
//!
//! The guard checks and lookups run before the store transaction; the
//! repository re-checks that the target row still exists inside it, so a
//! concurrent delete surfaces as not-found instead of a silent success.

use tracing::info;

use sportzone_domain::id::{ProductId, UserId};

use crate::domain::repository::{ProductRepository, UserRepository};
use crate::domain::types::{ProductDeletion, UserDeletion};
use crate::error::ShopServiceError;

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> DeleteProductUseCase<R> {
    pub async fn execute(&self, product_id: ProductId) -> Result<ProductDeletion, ShopServiceError> {
        let referenced = self.repo.count_order_references(product_id).await?;
        let product = self
            .repo
            .find_by_id(product_id)
            .await?
            .ok_or(ShopServiceError::ProductNotFound)?;
        let removed = self
            .repo
            .delete_with_lines(product_id)
            .await?
            .ok_or(ShopServiceError::ProductNotFound)?;
        info!(
            %product_id,
            referenced,
            order_lines_removed = removed,
            "product deleted"
        );
        Ok(ProductDeletion {
            product_name: product.name,
            order_references: removed,
        })
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<UserDeletion, ShopServiceError> {
        let administrators = self.repo.count_administrators().await?;
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(ShopServiceError::UserNotFound)?;
        if user.role.is_administrator() && administrators <= 1 {
            return Err(ShopServiceError::LastAdmin);
        }
        let stats = self.repo.stats(user_id).await?;
        if !self.repo.delete_cascade(user_id).await? {
            return Err(ShopServiceError::UserNotFound);
        }
        info!(
            %user_id,
            products = stats.products,
            orders = stats.orders,
            "user deleted"
        );
        Ok(UserDeletion {
            user_name: user.name,
            products: stats.products,
            orders: stats.orders,
        })
    }
}
