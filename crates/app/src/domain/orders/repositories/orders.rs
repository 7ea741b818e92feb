//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};

use crate::{
    database::{amount_to_i64, try_get_amount, try_get_quantity},
    domain::{
        carts::records::CartUuid,
        clients::records::{AddressUuid, ClientProfileUuid},
        orders::{
            records::{OrderClient, OrderDeliveryAddress, OrderRecord, OrderStore, OrderUuid},
            status::OrderStatus,
        },
        products::records::ProductUuid,
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
};

const LIST_CHECKOUT_LINES_SQL: &str = include_str!("../sql/list_checkout_lines.sql");
const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_CLIENT_ORDERS_SQL: &str = include_str!("../sql/list_client_orders.sql");
const LIST_STORE_ORDERS_SQL: &str = include_str!("../sql/list_store_orders.sql");
const LOCK_ORDER_STATUS_SQL: &str = include_str!("../sql/lock_order_status.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");

/// A cart line joined with the product details it will be snapshotted from.
#[derive(Debug, Clone)]
pub(crate) struct CheckoutLine {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_description: Option<String>,
    pub store_uuid: StoreUuid,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
}

/// A new order, with amounts copied from the cart.
#[derive(Debug, Clone)]
pub(crate) struct PendingOrder {
    pub uuid: OrderUuid,
    pub client: ClientProfileUuid,
    pub store: StoreUuid,
    pub address: AddressUuid,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub total: u64,
    pub payment_method: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_checkout_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CheckoutLine>, sqlx::Error> {
        query_as::<Postgres, CheckoutLine>(LIST_CHECKOUT_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "orders.repository.create_order",
        skip(self, tx, order),
        fields(
            order_uuid = %order.uuid,
            store_uuid = %order.store,
            rows_affected = tracing::field::Empty,
        ),
        err
    )]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: PendingOrder,
    ) -> Result<(), sqlx::Error> {
        let rows_affected = query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.client.into_uuid())
            .bind(order.store.into_uuid())
            .bind(order.address.into_uuid())
            .bind(amount_to_i64(order.subtotal, "subtotal")?)
            .bind(amount_to_i64(order.delivery_fee, "delivery_fee")?)
            .bind(amount_to_i64(order.total, "total")?)
            .bind(order.payment_method)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        tracing::Span::current().record("rows_affected", rows_affected);

        Ok(())
    }

    /// Fetch an order without its items.
    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Newest first, without items.
    pub(crate) async fn list_client_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientProfileUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_CLIENT_ORDERS_SQL)
            .bind(client.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Newest first, without items.
    pub(crate) async fn list_store_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_STORE_ORDERS_SQL)
            .bind(store.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock the order row and return its current status.
    pub(crate) async fn lock_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderStatus>, sqlx::Error> {
        let status: Option<String> = query_scalar(LOCK_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        status.as_deref().map(parse_status).transpose()
    }

    #[tracing::instrument(
        name = "orders.repository.update_status",
        skip(self, tx),
        fields(order_uuid = %order, status = %status, rows_affected = tracing::field::Empty),
        err
    )]
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(status == OrderStatus::Delivered)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        tracing::Span::current().record("rows_affected", rows_affected);

        Ok(rows_affected)
    }

    #[tracing::instrument(
        name = "orders.repository.delete_order",
        skip(self, tx),
        fields(order_uuid = %order, rows_affected = tracing::field::Empty),
        err
    )]
    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        tracing::Span::current().record("rows_affected", rows_affected);

        Ok(rows_affected)
    }
}

fn parse_status(status: &str) -> Result<OrderStatus, sqlx::Error> {
    status.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for CheckoutLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_description: row.try_get("product_description")?,
            store_uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            total_price: try_get_amount(row, "total_price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            client: OrderClient {
                uuid: ClientProfileUuid::from_uuid(row.try_get("client_profile_uuid")?),
                user_uuid: UserUuid::from_uuid(row.try_get("client_user_uuid")?),
            },
            store: OrderStore {
                uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
                name: row.try_get("store_name")?,
                owner_user_uuid: UserUuid::from_uuid(row.try_get("store_owner_user_uuid")?),
            },
            delivery_address: OrderDeliveryAddress {
                uuid: AddressUuid::from_uuid(row.try_get("delivery_address_uuid")?),
                street: row.try_get("address_street")?,
                number: row.try_get("address_number")?,
                complement: row.try_get("address_complement")?,
                city: row.try_get("address_city")?,
                state: row.try_get("address_state")?,
                postal_code: row.try_get("address_postal_code")?,
            },
            subtotal: try_get_amount(row, "subtotal")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            total: try_get_amount(row, "total")?,
            status: parse_status(&status)?,
            payment_method: row.try_get("payment_method")?,
            payment_status: row.try_get("payment_status")?,
            payment_date: row
                .try_get::<Option<SqlxTimestamp>, _>("payment_date")?
                .map(SqlxTimestamp::to_jiff),
            delivery_date_time: row
                .try_get::<Option<SqlxTimestamp>, _>("delivery_date_time")?
                .map(SqlxTimestamp::to_jiff),
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
