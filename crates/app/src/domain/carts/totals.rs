//! Cart totals.
//!
//! All amounts are minor currency units.

/// Subtotal at or above which delivery is free.
pub const FREE_DELIVERY_THRESHOLD: u64 = 50_00;

/// Flat delivery fee charged below [`FREE_DELIVERY_THRESHOLD`].
pub const DELIVERY_FEE: u64 = 5_00;

/// Largest amount a `BIGINT` money column can hold.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub total: u64,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub const EMPTY: Self = Self {
        subtotal: 0,
        delivery_fee: 0,
        total: 0,
    };

    /// Compute totals from the `total_price` of every line.
    ///
    /// Returns `None` when the total would exceed [`MAX_AMOUNT`].
    pub fn from_line_totals<I>(line_totals: I) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let subtotal = line_totals
            .into_iter()
            .try_fold(0_u64, u64::checked_add)?;

        Self::from_subtotal(subtotal)
    }

    /// Compute the fee and total for a subtotal.
    pub fn from_subtotal(subtotal: u64) -> Option<Self> {
        let delivery_fee = delivery_fee_for(subtotal);

        let total = subtotal
            .checked_add(delivery_fee)
            .filter(|total| *total <= MAX_AMOUNT)?;

        Some(Self {
            subtotal,
            delivery_fee,
            total,
        })
    }
}

/// Delivery fee owed for a subtotal. Nothing is owed for an empty cart.
#[must_use]
pub const fn delivery_fee_for(subtotal: u64) -> u64 {
    if subtotal == 0 || subtotal >= FREE_DELIVERY_THRESHOLD {
        0
    } else {
        DELIVERY_FEE
    }
}

/// Price of `quantity` units at `unit_price`, or `None` past [`MAX_AMOUNT`].
#[must_use]
pub fn line_total(unit_price: u64, quantity: u32) -> Option<u64> {
    unit_price
        .checked_mul(u64::from(quantity))
        .filter(|total| *total <= MAX_AMOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_has_no_fee() {
        assert_eq!(
            CartTotals::from_line_totals([]),
            Some(CartTotals::EMPTY),
            "empty cart should total zero"
        );
    }

    #[test]
    fn small_order_pays_delivery() {
        let totals = CartTotals::from_line_totals([20_00]);

        assert_eq!(
            totals,
            Some(CartTotals {
                subtotal: 20_00,
                delivery_fee: 5_00,
                total: 25_00,
            })
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let below = CartTotals::from_subtotal(49_99);
        let at = CartTotals::from_subtotal(50_00);

        assert_eq!(below.map(|t| t.delivery_fee), Some(DELIVERY_FEE));
        assert_eq!(at.map(|t| t.delivery_fee), Some(0));
        assert_eq!(at.map(|t| t.total), Some(50_00));
    }

    #[test]
    fn multiple_lines_are_summed() {
        let totals = CartTotals::from_line_totals([20_00, 40_00]);

        assert_eq!(
            totals,
            Some(CartTotals {
                subtotal: 60_00,
                delivery_fee: 0,
                total: 60_00,
            })
        );
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(CartTotals::from_line_totals([u64::MAX, 1]), None);
        assert_eq!(CartTotals::from_subtotal(u64::MAX - 1), None);
        assert_eq!(line_total(u64::MAX, 2), None);
    }

    #[test]
    fn amounts_are_bounded_by_bigint() {
        assert_eq!(
            CartTotals::from_subtotal(MAX_AMOUNT).map(|t| t.total),
            Some(MAX_AMOUNT)
        );
        assert_eq!(CartTotals::from_line_totals([MAX_AMOUNT, 1]), None);
        assert_eq!(CartTotals::from_subtotal(10_00).map(|t| t.total), Some(15_00));
        assert_eq!(line_total(MAX_AMOUNT, 1), Some(MAX_AMOUNT));
        assert_eq!(line_total(MAX_AMOUNT / 2 + 1, 2), None);
    }

    #[test]
    fn line_total_multiplies_quantity() {
        assert_eq!(line_total(10_00, 6), Some(60_00));
    }
}
