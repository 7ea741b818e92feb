//! Delete Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{
        access::{OrderRole, load_order},
        errors::into_status_error,
    },
    state::State,
};

/// Delete Order Handler
///
/// Clients remove their own orders while they are still `PENDING`.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Order deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is no longer pending"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the client who placed the order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = load_order(state, order.into_inner(), user, OrderRole::Client).await?;

    state
        .app
        .orders
        .delete_order(order.uuid)
        .await
        .map_err(into_status_error)?;

    info!(order = %order.uuid, "order deleted by client");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use agora_app::domain::orders::{MockOrdersService, OrderStatus, OrdersServiceError};

    use crate::test_helpers::{TEST_USER_UUID, make_order, orders_service, other_user};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_pending_order_returns_204() -> TestResult {
        let mut orders = MockOrdersService::new();
        let order = make_order(TEST_USER_UUID, other_user(), OrderStatus::Pending);
        let uuid = order.uuid;

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(order));

        orders
            .expect_delete_order()
            .once()
            .withf(move |order| *order == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_confirmed_order_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();
        let order = make_order(TEST_USER_UUID, other_user(), OrderStatus::Confirmed);
        let uuid = order.uuid;

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(order));

        orders
            .expect_delete_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotPending));

        let res = TestClient::delete(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
