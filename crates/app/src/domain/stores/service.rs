//! Stores service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        stores::{
            data::NewStore,
            errors::StoresServiceError,
            records::{StoreRecord, StoreUuid},
            repository::PgStoresRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgStoresService {
    db: Db,
    repository: PgStoresRepository,
}

impl PgStoresService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStoresRepository::new(),
        }
    }
}

#[async_trait]
impl StoresService for PgStoresService {
    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_store(&mut tx, store).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_store(&self, store: StoreUuid) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let store = self.repository.get_store(&mut tx, store).await?;

        tx.commit().await?;

        Ok(store)
    }

    async fn get_store_for_owner(
        &self,
        owner: UserUuid,
    ) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let store = self.repository.get_store_for_owner(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(store)
    }
}

#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// Opens a store for a producer.
    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, StoresServiceError>;

    /// Retrieve a single store.
    async fn get_store(&self, store: StoreUuid) -> Result<StoreRecord, StoresServiceError>;

    /// Resolves the store owned by a user.
    async fn get_store_for_owner(
        &self,
        owner: UserUuid,
    ) -> Result<StoreRecord, StoresServiceError>;
}
