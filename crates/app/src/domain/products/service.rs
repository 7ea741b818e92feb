//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::{
            data::NewProduct,
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        stores::records::StoreUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_store_products(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_store_products(&mut tx, store).await?;

        tx.commit().await?;

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a product in a store's catalog.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieves a store's catalog ordered by name.
    async fn list_store_products(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers};

    use super::*;

    #[tokio::test]
    async fn create_product_returns_correct_uuid_and_price() -> TestResult {
        let ctx = TestContext::new().await;
        let store = helpers::create_store(&ctx, "Padaria").await?;
        let uuid = ProductUuid::new();

        let product = ctx
            .products
            .create_product(NewProduct {
                uuid,
                store_uuid: store.uuid,
                name: "Pão de queijo".to_string(),
                description: None,
                price: 999,
            })
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.store_uuid, store.uuid);
        assert_eq!(product.price, 999);

        Ok(())
    }

    #[tokio::test]
    async fn price_beyond_bigint_is_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let store = helpers::create_store(&ctx, "Padaria").await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                store_uuid: store.uuid,
                name: "Bolo".to_string(),
                description: None,
                price: u64::MAX,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;
        let store = helpers::create_store(&ctx, "Padaria").await?;
        let created = helpers::create_product(&ctx, store.uuid, "Broa", 1500).await?;

        let product = ctx.products.get_product(created.uuid).await?;

        assert_eq!(product.uuid, created.uuid);
        assert_eq!(product.name, "Broa");
        assert_eq!(product.price, 1500);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_store_products_only_returns_that_store() -> TestResult {
        let ctx = TestContext::new().await;
        let bakery = helpers::create_store(&ctx, "Padaria").await?;
        let dairy = helpers::create_store(&ctx, "Laticínios").await?;

        let bread = helpers::create_product(&ctx, bakery.uuid, "Broa", 100).await?;
        let cheese = helpers::create_product(&ctx, dairy.uuid, "Queijo", 200).await?;

        let products = ctx.products.list_store_products(bakery.uuid).await?;
        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert!(uuids.contains(&bread.uuid), "bakery product should be listed");
        assert!(!uuids.contains(&cheese.uuid), "dairy product should not be listed");

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let store = helpers::create_store(&ctx, "Padaria").await?;
        let created = helpers::create_product(&ctx, store.uuid, "Broa", 100).await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: created.uuid,
                store_uuid: store.uuid,
                name: "Broa".to_string(),
                description: None,
                price: 200,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_for_unknown_store_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                store_uuid: StoreUuid::new(),
                name: "Orphan".to_string(),
                description: None,
                price: 100,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }
}
