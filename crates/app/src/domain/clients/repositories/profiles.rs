//! Client Profiles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    clients::{
        data::NewClientProfile,
        records::{ClientProfileRecord, ClientProfileUuid},
    },
    users::records::UserUuid,
};

const CREATE_CLIENT_PROFILE_SQL: &str = include_str!("../sql/create_client_profile.sql");
const GET_CLIENT_PROFILE_FOR_USER_SQL: &str =
    include_str!("../sql/get_client_profile_for_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgClientProfilesRepository;

impl PgClientProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_client_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: NewClientProfile,
    ) -> Result<ClientProfileRecord, sqlx::Error> {
        query_as::<Postgres, ClientProfileRecord>(CREATE_CLIENT_PROFILE_SQL)
            .bind(profile.uuid.into_uuid())
            .bind(profile.user_uuid.into_uuid())
            .bind(profile.cpf)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_client_profile_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<ClientProfileRecord, sqlx::Error> {
        query_as::<Postgres, ClientProfileRecord>(GET_CLIENT_PROFILE_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ClientProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ClientProfileUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            cpf: row.try_get("cpf")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
