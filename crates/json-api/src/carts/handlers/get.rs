//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    principal,
    state::State,
};

/// Get Cart Handler
///
/// Returns the authenticated client's cart, creating an empty one on first
/// access.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
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
        .get_cart(client)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use agora_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{
        TEST_CLIENT_UUID, app_service, carts_service, make_cart, missing_clients, strict_context,
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_cart_with_totals() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart(&[(2, 10_00)]);

        carts
            .expect_get_cart()
            .once()
            .withf(|client| *client == TEST_CLIENT_UUID)
            .return_once(move |_| Ok(cart));

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.items.len(), 1);
        assert_eq!(body.subtotal, 20_00);
        assert_eq!(body.delivery_fee, 5_00);
        assert_eq!(body.total, 25_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_without_client_profile_returns_404() -> TestResult {
        let mut app = strict_context();

        app.clients = Arc::new(missing_clients());

        let res = TestClient::get("http://example.com/cart")
            .send(&app_service(app, Router::with_path("cart").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_data_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::InvalidData));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
