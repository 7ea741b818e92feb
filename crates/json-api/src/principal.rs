//! Resolve the authenticated user's client profile and store.

use salvo::prelude::StatusError;
use tracing::error;

use agora_app::domain::{
    clients::{ClientsServiceError, records::ClientProfileUuid},
    stores::{StoresServiceError, records::StoreUuid},
    users::records::UserUuid,
};

use crate::state::State;

/// Client profile of `user`, or 404 when the user has none.
pub(crate) async fn client_profile(
    state: &State,
    user: UserUuid,
) -> Result<ClientProfileUuid, StatusError> {
    match state.app.clients.get_client_profile_for_user(user).await {
        Ok(profile) => Ok(profile.uuid),
        Err(ClientsServiceError::NotFound) => {
            Err(StatusError::not_found().brief("Client profile not found"))
        }
        Err(source) => {
            error!("failed to resolve client profile: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}

/// Store owned by `user`, or 404 when the user owns none.
pub(crate) async fn owned_store(state: &State, user: UserUuid) -> Result<StoreUuid, StatusError> {
    match state.app.stores.get_store_for_owner(user).await {
        Ok(store) => Ok(store.uuid),
        Err(StoresServiceError::NotFound) => Err(StatusError::not_found().brief("Store not found")),
        Err(source) => {
            error!("failed to resolve store: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}
