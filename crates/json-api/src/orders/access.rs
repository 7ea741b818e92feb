//! Order visibility for the authenticated user.

use salvo::prelude::StatusError;
use uuid::Uuid;

use agora_app::domain::{orders::records::OrderRecord, users::records::UserUuid};

use crate::{orders::errors::into_status_error, state::State};

/// Which side of the order the caller must be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderRole {
    /// The client who placed it or the store owner.
    Any,
    Client,
    StoreOwner,
}

/// Load an order the user may act on.
///
/// Orders the user cannot see answer 404 so their existence is not leaked.
/// A visible order acted on from the wrong side answers 403.
pub(crate) async fn load_order(
    state: &State,
    order: Uuid,
    user: UserUuid,
    role: OrderRole,
) -> Result<OrderRecord, StatusError> {
    let record = state
        .app
        .orders
        .get_order(order.into())
        .await
        .map_err(into_status_error)?;

    if !record.is_visible_to(user) {
        return Err(StatusError::not_found().brief("order not found"));
    }

    let allowed = match role {
        OrderRole::Any => true,
        OrderRole::Client => record.client.user_uuid == user,
        OrderRole::StoreOwner => record.store.owner_user_uuid == user,
    };

    if !allowed {
        return Err(StatusError::forbidden());
    }

    Ok(record)
}
