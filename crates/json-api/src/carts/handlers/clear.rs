//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    principal,
    state::State,
};

/// Clear Cart Handler
///
/// Removes every item from the cart. Clearing an empty cart succeeds.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Emptied cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Client profile not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let client = principal::client_profile(state, user).await?;

    let cart = state
        .app
        .carts
        .clear_cart(client)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use agora_app::domain::carts::MockCartsService;

    use crate::test_helpers::{TEST_CLIENT_UUID, carts_service, make_cart};

    use super::*;

    #[tokio::test]
    async fn test_clear_returns_zeroed_cart() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart(&[]);

        carts
            .expect_clear_cart()
            .once()
            .withf(|client| *client == TEST_CLIENT_UUID)
            .return_once(move |_| Ok(cart));

        let mut res = TestClient::delete("http://example.com/cart")
            .send(&carts_service(carts, Router::with_path("cart").delete(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert!(body.items.is_empty(), "expected no items");
        assert_eq!(body.total, 0);
        assert_eq!(body.delivery_fee, 0);

        Ok(())
    }
}
