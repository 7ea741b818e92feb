//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agora_app::domain::carts::data::NewCartItem;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    principal,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Product to add
    pub product_uuid: Uuid,

    /// Units to add; re-adding a product increases its quantity
    pub quantity: u32,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added, updated cart returned"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let client = principal::client_profile(state, user).await?;

    let item: NewCartItem = json.into_inner().into();
    let product = item.product_uuid;

    let cart = state
        .app
        .carts
        .add_item(client, item)
        .await
        .map_err(into_status_error)?;

    if let Some(line) = cart.items.iter().find(|line| line.product_uuid == product) {
        res.add_header(LOCATION, format!("/cart/items/{}", line.uuid), true)
            .or_500("failed to set location header")?;
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(cart.into()))
}
