//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use smallvec::SmallVec;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::repositories::PgCartsRepository,
        clients::{records::ClientProfileUuid, repositories::PgAddressesRepository},
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid, StatusChange},
            repositories::{
                CheckoutLine, PendingOrder, PgOrderItemsRepository, PgOrdersRepository,
                SnapshotOrderItem,
            },
            status::OrderStatus,
        },
        stores::records::StoreUuid,
    },
};

/// Payment method recorded when checkout does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "PENDING";

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    addresses_repository: PgAddressesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            addresses_repository: PgAddressesRepository::new(),
        }
    }

    async fn hydrate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items = self.items_repository.list_items(tx, &uuids).await?;

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn load_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let order = self.orders_repository.get_order(tx, order).await?;

        self.hydrate(tx, vec![order])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)
    }

    /// Apply a status change under the order's row lock.
    async fn transition(
        &self,
        order: OrderUuid,
        next: OrderStatus,
    ) -> Result<StatusChange, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders_repository
            .lock_status(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let next = current.transition_to(next)?;

        self.orders_repository
            .update_status(&mut tx, order, next)
            .await?;

        let updated = self.load_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(
            order_uuid = %order,
            from = %current,
            to = %next,
            "order status changed"
        );

        Ok(StatusChange {
            previous: current,
            order: updated,
        })
    }
}

/// The single store every line belongs to.
fn single_store(lines: &[CheckoutLine]) -> Result<StoreUuid, OrdersServiceError> {
    let mut stores: SmallVec<[StoreUuid; 2]> = SmallVec::new();

    for line in lines {
        if !stores.contains(&line.store_uuid) {
            stores.push(line.store_uuid);
        }
    }

    match stores.as_slice() {
        [] => Err(OrdersServiceError::EmptyCart),
        [store] => Ok(*store),
        _ => Err(OrdersServiceError::MultipleStores),
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        client: ClientProfileUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, client)
            .await?
            .ok_or(OrdersServiceError::EmptyCart)?;

        let lines = self
            .orders_repository
            .list_checkout_lines(&mut tx, cart.uuid)
            .await?;

        let store = single_store(&lines)?;

        let address = self
            .addresses_repository
            .find_address_for_client(&mut tx, client)
            .await?
            .ok_or(OrdersServiceError::AddressNotFound)?;

        let order_uuid = OrderUuid::new();

        self.orders_repository
            .create_order(
                &mut tx,
                PendingOrder {
                    uuid: order_uuid,
                    client,
                    store,
                    address: address.uuid,
                    subtotal: cart.subtotal,
                    delivery_fee: cart.delivery_fee,
                    total: cart.total,
                    payment_method: order
                        .payment_method
                        .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
                },
            )
            .await?;

        let line_count = lines.len();

        for line in lines {
            self.items_repository
                .create_item(
                    &mut tx,
                    order_uuid,
                    SnapshotOrderItem {
                        product_uuid: line.product_uuid,
                        product_name: line.product_name,
                        product_description: line.product_description,
                        quantity: line.quantity,
                        unit_price: line.unit_price,
                        total_price: line.total_price,
                    },
                )
                .await?;
        }

        self.carts_repository.clear_cart(&mut tx, cart.uuid).await?;

        let created = self.load_order(&mut tx, order_uuid).await?;

        tx.commit().await?;

        info!(
            order_uuid = %created.uuid,
            client_profile_uuid = %client,
            store_uuid = %store,
            total = created.total,
            items = line_count,
            status = %created.status,
            "order created"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.load_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_client_orders(
        &self,
        client: ClientProfileUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_client_orders(&mut tx, client)
            .await?;

        let orders = self.hydrate(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_store_orders(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_store_orders(&mut tx, store)
            .await?;

        let orders = self.hydrate(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<StatusChange, OrdersServiceError> {
        self.transition(order, status).await
    }

    async fn cancel_order(&self, order: OrderUuid) -> Result<StatusChange, OrdersServiceError> {
        self.transition(order, OrderStatus::Canceled).await
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let status = self
            .orders_repository
            .lock_status(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if status != OrderStatus::Pending {
            return Err(OrdersServiceError::NotPending);
        }

        self.orders_repository.delete_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(order_uuid = %order, status = %status, "order removed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Check out the client's cart.
    ///
    /// The order copies the cart totals and snapshots every line. The cart
    /// is emptied in the same transaction.
    async fn create_order(
        &self,
        client: ClientProfileUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed by the client, newest first.
    async fn list_client_orders(
        &self,
        client: ClientProfileUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Orders placed with the store, newest first.
    async fn list_store_orders(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move the order to `status` if the transition table allows it.
    /// Entering `DELIVERED` stamps the delivery time.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<StatusChange, OrdersServiceError>;

    /// Move the order to `CANCELED`.
    async fn cancel_order(&self, order: OrderUuid) -> Result<StatusChange, OrdersServiceError>;

    /// Hard-delete a `PENDING` order and its items.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}
