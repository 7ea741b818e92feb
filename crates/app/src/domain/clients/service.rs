//! Clients service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        clients::{
            data::{NewAddress, NewClientProfile},
            errors::ClientsServiceError,
            records::{AddressRecord, ClientProfileRecord, ClientProfileUuid},
            repositories::{PgAddressesRepository, PgClientProfilesRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgClientsService {
    db: Db,
    profiles_repository: PgClientProfilesRepository,
    addresses_repository: PgAddressesRepository,
}

impl PgClientsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            profiles_repository: PgClientProfilesRepository::new(),
            addresses_repository: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl ClientsService for PgClientsService {
    async fn create_client_profile(
        &self,
        profile: NewClientProfile,
    ) -> Result<ClientProfileRecord, ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .profiles_repository
            .create_client_profile(&mut tx, profile)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_client_profile_for_user(
        &self,
        user: UserUuid,
    ) -> Result<ClientProfileRecord, ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self
            .profiles_repository
            .get_client_profile_for_user(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn set_address(
        &self,
        client: ClientProfileUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .addresses_repository
            .create_address(&mut tx, client, address)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_address(
        &self,
        client: ClientProfileUuid,
    ) -> Result<AddressRecord, ClientsServiceError> {
        let mut tx = self.db.begin().await?;

        let address = self
            .addresses_repository
            .find_address_for_client(&mut tx, client)
            .await?
            .ok_or(ClientsServiceError::AddressNotFound)?;

        tx.commit().await?;

        Ok(address)
    }
}

#[automock]
#[async_trait]
pub trait ClientsService: Send + Sync {
    /// Creates the client profile for a user.
    async fn create_client_profile(
        &self,
        profile: NewClientProfile,
    ) -> Result<ClientProfileRecord, ClientsServiceError>;

    /// Resolves the client profile owned by a user.
    async fn get_client_profile_for_user(
        &self,
        user: UserUuid,
    ) -> Result<ClientProfileRecord, ClientsServiceError>;

    /// Registers the delivery address of a client. A client has at most one.
    async fn set_address(
        &self,
        client: ClientProfileUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, ClientsServiceError>;

    /// Retrieve the delivery address of a client.
    async fn get_address(
        &self,
        client: ClientProfileUuid,
    ) -> Result<AddressRecord, ClientsServiceError>;
}
