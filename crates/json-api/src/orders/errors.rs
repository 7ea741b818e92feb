//! Errors

use salvo::http::StatusError;
use tracing::error;

use agora_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound | OrdersServiceError::AddressNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::EmptyCart
        | OrdersServiceError::MultipleStores
        | OrdersServiceError::InvalidTransition(_)
        | OrdersServiceError::NotPending => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use agora_app::domain::orders::{OrderStatus, StatusTransitionError};

    use super::*;

    #[test]
    fn invalid_transition_keeps_its_message() {
        let error = into_status_error(OrdersServiceError::InvalidTransition(
            StatusTransitionError {
                from: OrderStatus::Confirmed,
                to: OrderStatus::Delivered,
            },
        ));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "CONFIRMED → DELIVERED not allowed");
    }

    #[test]
    fn business_rule_errors_are_bad_requests() {
        for source in [
            OrdersServiceError::EmptyCart,
            OrdersServiceError::MultipleStores,
            OrdersServiceError::NotPending,
        ] {
            let message = source.to_string();
            let error = into_status_error(source);

            assert_eq!(error.code, StatusCode::BAD_REQUEST);
            assert_eq!(error.brief, message);
        }
    }

    #[test]
    fn missing_order_is_not_found() {
        assert_eq!(
            into_status_error(OrdersServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            into_status_error(OrdersServiceError::AddressNotFound).code,
            StatusCode::NOT_FOUND
        );
    }
}
