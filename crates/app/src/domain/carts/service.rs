//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpdate, NewCartItem},
            errors::CartsServiceError,
            records::{CartItemUuid, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository, PricedCartLine},
            totals::{CartTotals, line_total},
        },
        clients::records::ClientProfileUuid,
        products::repository::PgProductsRepository,
    },
};

/// Largest quantity a single cart line may hold.
const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Get-or-create the client's cart and hold its row lock.
    async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientProfileUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        self.carts_repository.ensure_cart(tx, client).await?;

        self.carts_repository
            .lock_cart(tx, client)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    /// Re-read the items and persist freshly derived totals.
    async fn recompute_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self.items_repository.list_items(tx, cart).await?;

        let totals = CartTotals::from_line_totals(items.iter().map(|item| item.total_price))
            .ok_or(CartsServiceError::InvalidData)?;

        let mut cart = self
            .carts_repository
            .update_totals(tx, cart, totals)
            .await?;

        cart.items = items;

        Ok(cart)
    }
}

fn ensure_valid_quantity(quantity: u32) -> Result<(), CartsServiceError> {
    if quantity == 0 || quantity > MAX_QUANTITY {
        return Err(CartsServiceError::InvalidQuantity);
    }

    Ok(())
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, client: ClientProfileUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.ensure_cart(&mut tx, client).await?;

        let mut cart = self.carts_repository.get_cart(&mut tx, client).await?;

        cart.items = self.items_repository.list_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        client: ClientProfileUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        ensure_valid_quantity(item.quantity)?;

        let mut tx = self.db.begin().await?;

        let cart = self.lock_cart(&mut tx, client).await?;

        let product = self
            .products_repository
            .find_product(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let total_price =
            line_total(product.price, item.quantity).ok_or(CartsServiceError::InvalidData)?;

        let existing = self
            .items_repository
            .list_items(&mut tx, cart.uuid)
            .await?
            .into_iter()
            .find(|line| line.product_uuid == product.uuid);

        if let Some(line) = existing {
            let merged = line
                .quantity
                .checked_add(item.quantity)
                .filter(|quantity| *quantity <= MAX_QUANTITY)
                .ok_or(CartsServiceError::InvalidQuantity)?;

            line_total(line.unit_price, merged).ok_or(CartsServiceError::InvalidData)?;
        }

        self.items_repository
            .upsert_item(
                &mut tx,
                cart.uuid,
                PricedCartLine {
                    product_uuid: product.uuid,
                    quantity: item.quantity,
                    unit_price: product.price,
                    total_price,
                },
            )
            .await?;

        let cart = self.recompute_totals(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        debug!(
            cart_uuid = %cart.uuid,
            product_uuid = %product.uuid,
            quantity = item.quantity,
            "added item to cart"
        );

        Ok(cart)
    }

    async fn update_item(
        &self,
        client: ClientProfileUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartRecord, CartsServiceError> {
        ensure_valid_quantity(update.quantity)?;

        let mut tx = self.db.begin().await?;

        let cart = self.lock_cart(&mut tx, client).await?;

        let line = self
            .items_repository
            .list_items(&mut tx, cart.uuid)
            .await?
            .into_iter()
            .find(|line| line.uuid == item)
            .ok_or(CartsServiceError::ItemNotFound)?;

        line_total(line.unit_price, update.quantity).ok_or(CartsServiceError::InvalidData)?;

        self.items_repository
            .update_quantity(&mut tx, cart.uuid, item, update.quantity)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        let cart = self.recompute_totals(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        client: ClientProfileUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_cart(&mut tx, client).await?;

        let rows_affected = self
            .items_repository
            .delete_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        let cart = self.recompute_totals(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, client: ClientProfileUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_cart(&mut tx, client).await?;

        let cart = self.carts_repository.clear_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        debug!(cart_uuid = %cart.uuid, "cleared cart");

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the client's cart, creating an empty one on first access.
    async fn get_cart(&self, client: ClientProfileUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product to the client's cart at the product's current price.
    async fn add_item(
        &self,
        client: ClientProfileUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Set the quantity of an item in the client's cart.
    async fn update_item(
        &self,
        client: ClientProfileUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove an item from the client's cart.
    async fn remove_item(
        &self,
        client: ClientProfileUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Empty the client's cart.
    async fn clear_cart(&self, client: ClientProfileUuid) -> Result<CartRecord, CartsServiceError>;
}
