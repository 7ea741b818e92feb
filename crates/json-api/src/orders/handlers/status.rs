//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agora_app::domain::orders::OrderStatus;

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

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Target status, e.g. `CONFIRMED`
    pub status: String,
}

/// Update Order Status Handler
///
/// Store owners move their orders through the lifecycle. Transitions the
/// lifecycle does not allow answer 400.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order with its new status"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or transition not allowed"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the store owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("unknown order status")?;

    let current = load_order(state, order.into_inner(), user, OrderRole::StoreOwner).await?;

    let change = state
        .app
        .orders
        .update_status(current.uuid, status)
        .await
        .map_err(into_status_error)?;

    record_order_transition(change.previous.as_str(), change.order.status.as_str());

    Ok(Json(change.order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use agora_app::domain::orders::{
        MockOrdersService, OrdersServiceError, StatusTransitionError, records::StatusChange,
    };

    use crate::{
        observability::order_transition_count,
        test_helpers::{TEST_USER_UUID, make_order, orders_service, other_user},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}/status").patch(handler))
    }

    #[tokio::test]
    async fn test_store_owner_confirms_order() -> TestResult {
        let mut orders = MockOrdersService::new();
        let order = make_order(other_user(), TEST_USER_UUID, OrderStatus::Pending);
        let uuid = order.uuid;
        let mut confirmed = order.clone();

        confirmed.status = OrderStatus::Confirmed;

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(order));

        orders
            .expect_update_status()
            .once()
            .withf(move |order, status| *order == uuid && *status == OrderStatus::Confirmed)
            .return_once(move |_, _| {
                Ok(StatusChange {
                    previous: OrderStatus::Pending,
                    order: confirmed,
                })
            });

        let mut res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "CONFIRMED" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "CONFIRMED");

        Ok(())
    }

    #[tokio::test]
    async fn test_transition_metric_uses_locked_status() -> TestResult {
        let mut orders = MockOrdersService::new();
        let stale = make_order(other_user(), TEST_USER_UUID, OrderStatus::Pending);
        let uuid = stale.uuid;
        let mut preparing = stale.clone();

        preparing.status = OrderStatus::InPreparation;

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(stale));

        orders.expect_update_status().once().return_once(move |_, _| {
            Ok(StatusChange {
                previous: OrderStatus::Confirmed,
                order: preparing,
            })
        });

        let locked_before = order_transition_count("CONFIRMED", "IN_PREPARATION");
        let stale_before = order_transition_count("PENDING", "IN_PREPARATION");

        let res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "IN_PREPARATION" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            order_transition_count("CONFIRMED", "IN_PREPARATION"),
            locked_before.saturating_add(1),
            "transition should be labelled with the locked status"
        );
        assert_eq!(
            order_transition_count("PENDING", "IN_PREPARATION"),
            stale_before,
            "stale status should not be recorded"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_disallowed_transition_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();
        let order = make_order(other_user(), TEST_USER_UUID, OrderStatus::Confirmed);
        let uuid = order.uuid;

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(order));

        orders.expect_update_status().once().return_once(|_, _| {
            Err(OrdersServiceError::InvalidTransition(StatusTransitionError {
                from: OrderStatus::Confirmed,
                to: OrderStatus::Delivered,
            }))
        });

        let res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "DELIVERED" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400_without_lookup() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();
        orders.expect_update_status().never();

        let res = TestClient::patch(format!("http://example.com/orders/{}/status", Uuid::now_v7()))
            .json(&json!({ "status": "LOST" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_client_cannot_change_status() -> TestResult {
        let mut orders = MockOrdersService::new();
        let order = make_order(TEST_USER_UUID, other_user(), OrderStatus::Pending);
        let uuid = order.uuid;

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(order));

        orders.expect_update_status().never();

        let res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "CONFIRMED" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
