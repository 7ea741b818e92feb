//! Delivery Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::clients::{
    data::NewAddress,
    records::{AddressRecord, AddressUuid, ClientProfileUuid},
};

const CREATE_ADDRESS_SQL: &str = include_str!("../sql/create_address.sql");
const FIND_ADDRESS_FOR_CLIENT_SQL: &str = include_str!("../sql/find_address_for_client.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientProfileUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(CREATE_ADDRESS_SQL)
            .bind(address.uuid.into_uuid())
            .bind(client.into_uuid())
            .bind(address.street)
            .bind(address.number)
            .bind(address.complement)
            .bind(address.city)
            .bind(address.state)
            .bind(address.postal_code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_address_for_client(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        client: ClientProfileUuid,
    ) -> Result<Option<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(FIND_ADDRESS_FOR_CLIENT_SQL)
            .bind(client.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AddressRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            client_profile_uuid: ClientProfileUuid::from_uuid(row.try_get("client_profile_uuid")?),
            street: row.try_get("street")?,
            number: row.try_get("number")?,
            complement: row.try_get("complement")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            postal_code: row.try_get("postal_code")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
