//! Create Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use agora_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    observability::record_order_created,
    orders::{errors::into_status_error, responses::OrderResponse},
    principal,
    state::State,
};

/// Create Order Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Payment method; recorded as `PENDING` when omitted
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            payment_method: request.payment_method,
        }
    }
}

/// Create Order Handler
///
/// Checks out the authenticated client's cart. The cart must hold items from
/// exactly one store and the client must have a delivery address.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or items from several stores"),
        (status_code = StatusCode::NOT_FOUND, description = "Client profile or delivery address not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let client = principal::client_profile(state, user).await?;

    let order = state
        .app
        .orders
        .create_order(client, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_order_created();

    info!(order = %order.uuid, total = order.total, "checkout completed");

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
