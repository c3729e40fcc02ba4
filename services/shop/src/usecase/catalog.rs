use rust_decimal::Decimal;
use tracing::info;

use sportzone_domain::id::{ProductId, UserId};
use sportzone_domain::product::Category;

use crate::domain::repository::ProductRepository;
use crate::domain::types::{Product, ProductDraft, ProductListing};
use crate::error::ShopServiceError;

/// Raw product fields as they arrive from a client.
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub brand: Option<String>,
    pub category: String,
    pub image: Option<String>,
}

impl ProductInput {
    fn into_draft(self) -> Result<ProductDraft, ShopServiceError> {
        let category: Category = self
            .category
            .parse()
            .map_err(|_| ShopServiceError::InvalidCategory)?;
        let draft = ProductDraft {
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            brand: self.brand,
            category,
            image: self.image,
        };
        if !draft.is_valid() {
            return Err(ShopServiceError::InvalidProduct);
        }
        Ok(draft)
    }
}

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListProductsUseCase<R> {
    /// Whole catalog, or one category when `category` is given.
    pub async fn execute(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<ProductListing>, ShopServiceError> {
        let category = category
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|_| ShopServiceError::InvalidCategory)?;
        self.repo.list(category).await
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(
        &self,
        owner: UserId,
        input: ProductInput,
    ) -> Result<Product, ShopServiceError> {
        let draft = input.into_draft()?;
        let product = self.repo.create(owner, &draft).await?;
        info!(product_id = %product.id, %owner, "product created");
        Ok(product)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub async fn execute(
        &self,
        product_id: ProductId,
        input: ProductInput,
    ) -> Result<(), ShopServiceError> {
        let draft = input.into_draft()?;
        if !self.repo.update(product_id, &draft).await? {
            return Err(ShopServiceError::ProductNotFound);
        }
        Ok(())
    }
}

// ── ProductStats ─────────────────────────────────────────────────────────────

pub struct ProductStatsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ProductStatsUseCase<R> {
    /// Number of order lines that reference the product.
    pub async fn execute(&self, product_id: ProductId) -> Result<u64, ShopServiceError> {
        self.repo.count_order_references(product_id).await
    }
}
