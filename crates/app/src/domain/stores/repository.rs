//! Stores Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    stores::{
        data::NewStore,
        records::{StoreRecord, StoreUuid},
    },
    users::records::UserUuid,
};

const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");
const GET_STORE_SQL: &str = include_str!("sql/get_store.sql");
const GET_STORE_FOR_OWNER_SQL: &str = include_str!("sql/get_store_for_owner.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStoresRepository;

impl PgStoresRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.uuid.into_uuid())
            .bind(store.owner_user_uuid.into_uuid())
            .bind(store.name)
            .bind(store.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(GET_STORE_SQL)
            .bind(store.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_store_for_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(GET_STORE_FOR_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            owner_user_uuid: UserUuid::from_uuid(row.try_get("owner_user_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
