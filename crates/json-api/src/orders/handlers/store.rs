//! List Store Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    principal,
    state::State,
};

/// List Store Orders Handler
///
/// Orders placed with the store owned by the authenticated user, newest
/// first.
#[endpoint(
    tags("orders"),
    summary = "List My Store's Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let store = principal::owned_store(state, user).await?;

    let orders = state
        .app
        .orders
        .list_store_orders(store)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use agora_app::domain::{
        orders::{MockOrdersService, OrderStatus},
        stores::{MockStoresService, StoresServiceError},
    };

    use crate::test_helpers::{
        TEST_STORE_UUID, TEST_USER_UUID, app_service, make_order, orders_service, other_user,
        strict_context,
    };

    use super::*;

    #[tokio::test]
    async fn test_store_orders_are_resolved_through_owner() -> TestResult {
        let mut orders = MockOrdersService::new();
        let order = make_order(other_user(), TEST_USER_UUID, OrderStatus::Confirmed);

        orders
            .expect_list_store_orders()
            .once()
            .withf(|store| *store == TEST_STORE_UUID)
            .return_once(move |_| Ok(vec![order]));

        let mut res = TestClient::get("http://example.com/orders/store")
            .send(&orders_service(
                orders,
                Router::with_path("orders/store").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(body.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_user_without_store_returns_404() -> TestResult {
        let mut app = strict_context();
        let mut stores = MockStoresService::new();

        stores
            .expect_get_store_for_owner()
            .once()
            .return_once(|_| Err(StoresServiceError::NotFound));

        app.stores = Arc::new(stores);

        let res = TestClient::get("http://example.com/orders/store")
            .send(&app_service(app, Router::with_path("orders/store").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
