//! List Client Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    principal,
    state::State,
};

/// List Client Orders Handler
///
/// Orders placed by the authenticated client, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::NOT_FOUND, description = "Client profile not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let client = principal::client_profile(state, user).await?;

    let orders = state
        .app
        .orders
        .list_client_orders(client)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use agora_app::domain::orders::{MockOrdersService, OrderStatus};

    use crate::test_helpers::{
        TEST_CLIENT_UUID, TEST_USER_UUID, make_order, orders_service, other_user,
    };

    use super::*;

    #[tokio::test]
    async fn test_index_keeps_service_order() -> TestResult {
        let mut orders = MockOrdersService::new();
        let newest = make_order(TEST_USER_UUID, other_user(), OrderStatus::Pending);
        let oldest = make_order(TEST_USER_UUID, other_user(), OrderStatus::Delivered);
        let expected: Vec<Uuid> = vec![newest.uuid.into(), oldest.uuid.into()];

        orders
            .expect_list_client_orders()
            .once()
            .withf(|client| *client == TEST_CLIENT_UUID)
            .return_once(move |_| Ok(vec![newest, oldest]));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&orders_service(orders, Router::with_path("orders").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<OrderResponse> = res.take_json().await?;
        let uuids: Vec<Uuid> = body.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, expected);

        Ok(())
    }
}
