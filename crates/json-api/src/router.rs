//! App Router

use salvo::Router;

use crate::{auth, carts, orders};

/// Authenticated cart and order routes.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .patch(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("store").get(orders::store::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .delete(orders::delete::handler)
                        .push(Router::with_path("status").patch(orders::status::handler))
                        .push(Router::with_path("cancel").patch(orders::cancel::handler)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, prelude::*, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::strict_context;

    use super::*;

    #[tokio::test]
    async fn test_routes_require_bearer_token() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject(crate::state::State::from_app_context(strict_context())))
                .push(app_router()),
        );

        for path in ["/cart", "/orders", "/orders/store"] {
            let res = TestClient::get(format!("http://example.com{path}"))
                .send(&service)
                .await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "expected 401 for {path}"
            );
        }

        Ok(())
    }
}
