//! Order Data

/// Checkout request. The payment method defaults to `PENDING`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrder {
    pub payment_method: Option<String>,
}
