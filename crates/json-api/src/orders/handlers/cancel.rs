//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    observability::record_order_transition,
    orders::{
        access::{OrderRole, load_order},
        errors::into_status_error,
        responses::OrderResponse,
    },
    state::State,
};

/// Cancel Order Handler
///
/// Clients cancel their own orders while they are `PENDING` or `CONFIRMED`.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Canceled order"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order can no longer be canceled"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the client who placed the order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let current = load_order(state, order.into_inner(), user, OrderRole::Client).await?;

    let change = state
        .app
        .orders
        .cancel_order(current.uuid)
        .await
        .map_err(into_status_error)?;

    record_order_transition(change.previous.as_str(), change.order.status.as_str());

    Ok(Json(change.order.into()))
}
