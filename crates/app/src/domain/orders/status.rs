//! Order status state machine.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Lifecycle status of an order. `DELIVERED` and `CANCELED` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InPreparation,
    ReadyForPickup,
    InTransit,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InPreparation,
        OrderStatus::ReadyForPickup,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::InPreparation => "IN_PREPARATION",
            OrderStatus::ReadyForPickup => "READY_FOR_PICKUP",
            OrderStatus::InTransit => "IN_TRANSIT",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    /// Statuses reachable from `self` in a single step.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Canceled],
            OrderStatus::Confirmed => &[OrderStatus::InPreparation, OrderStatus::Canceled],
            OrderStatus::InPreparation => &[OrderStatus::ReadyForPickup],
            OrderStatus::ReadyForPickup => &[OrderStatus::InTransit],
            OrderStatus::InTransit => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Canceled => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }

    /// Validate a move from `self` to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTransitionError`] when `next` is not in
    /// [`OrderStatus::allowed_transitions`].
    pub fn transition_to(self, next: OrderStatus) -> Result<OrderStatus, StatusTransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(StatusTransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseOrderStatusError(s.to_string()))
    }
}

/// A rejected status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{from} → {to} not allowed")]
pub struct StatusTransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    use OrderStatus::*;

    #[test]
    fn transition_table_matches_workflow() {
        let expected: [(OrderStatus, &[OrderStatus]); 7] = [
            (Pending, &[Confirmed, Canceled]),
            (Confirmed, &[InPreparation, Canceled]),
            (InPreparation, &[ReadyForPickup]),
            (ReadyForPickup, &[InTransit]),
            (InTransit, &[Delivered]),
            (Delivered, &[]),
            (Canceled, &[]),
        ];

        for (from, allowed) in expected {
            assert_eq!(from.allowed_transitions(), allowed, "transitions from {from}");
        }
    }

    #[test]
    fn every_pair_outside_the_table_is_rejected() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let result = from.transition_to(to);

                if from.allowed_transitions().contains(&to) {
                    assert_eq!(result, Ok(to));
                } else {
                    assert_eq!(result, Err(StatusTransitionError { from, to }));
                }
            }
        }
    }

    #[test]
    fn terminal_statuses_have_no_exits() {
        for status in OrderStatus::ALL {
            assert_eq!(
                status.is_terminal(),
                status.allowed_transitions().is_empty(),
                "{status}"
            );
        }
    }

    #[test]
    fn only_pending_and_confirmed_can_be_canceled() {
        let cancellable: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|status| status.can_transition_to(Canceled))
            .collect();

        assert_eq!(cancellable, vec![Pending, Confirmed]);
    }

    #[test]
    fn transition_error_names_both_statuses() {
        let message = Confirmed
            .transition_to(Delivered)
            .map_err(|error| error.to_string());

        assert_eq!(message, Err("CONFIRMED → DELIVERED not allowed".to_string()));
    }

    #[test]
    fn parses_wire_names() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }

        assert_eq!(
            "shipped".parse::<OrderStatus>(),
            Err(ParseOrderStatusError("shipped".to_string()))
        );
        assert!("pending".parse::<OrderStatus>().is_err(), "names are case sensitive");
    }
}
