//! Coupon definitions and the discount they grant.

use common::{Decimal, Money};
use serde::{Deserialize, Serialize};

/// How a coupon's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    /// `value` is a percentage of the subtotal.
    Percent,
    /// `value` is a flat amount off the subtotal.
    Fixed,
}

/// A coupon known to the pricing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    pub kind: CouponKind,
    pub value: Decimal,
    pub active: bool,
}

impl Coupon {
    /// An active percentage coupon.
    pub fn percent(value: impl Into<Decimal>) -> Self {
        Self {
            kind: CouponKind::Percent,
            value: value.into(),
            active: true,
        }
    }

    /// An active flat-amount coupon.
    pub fn fixed(value: impl Into<Decimal>) -> Self {
        Self {
            kind: CouponKind::Fixed,
            value: value.into(),
            active: true,
        }
    }

    /// Marks the coupon as inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// The discount this coupon grants on `items_total`.
    pub fn discount_for(&self, items_total: Money) -> Money {
        match self.kind {
            CouponKind::Percent => items_total.percent(self.value),
            CouponKind::Fixed => Money::new(self.value),
        }
    }

    /// Evaluates the coupon against a subtotal.
    ///
    /// The final amount never drops below zero, even when a flat discount
    /// exceeds the subtotal.
    pub fn evaluate(&self, items_total: Money) -> CouponDecision {
        if !self.active {
            return CouponDecision::Invalid;
        }

        let discount = self.discount_for(items_total);
        CouponDecision::Valid {
            discount,
            final_total: items_total.saturating_sub(discount),
        }
    }
}

/// Outcome of validating a coupon code against a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponDecision {
    Valid { discount: Money, final_total: Money },
    Invalid,
}

impl CouponDecision {
    pub fn is_valid(&self) -> bool {
        matches!(self, CouponDecision::Valid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_coupon_discount() {
        let coupon = Coupon::percent(10);
        let decision = coupon.evaluate(Money::from_units(200));

        assert_eq!(
            decision,
            CouponDecision::Valid {
                discount: Money::from_units(20),
                final_total: Money::from_units(180),
            }
        );
    }

    #[test]
    fn test_fixed_coupon_discount() {
        let coupon = Coupon::fixed(15);
        let decision = coupon.evaluate(Money::from_units(50));

        assert_eq!(
            decision,
            CouponDecision::Valid {
                discount: Money::from_units(15),
                final_total: Money::from_units(35),
            }
        );
    }

    #[test]
    fn test_fixed_coupon_larger_than_total_floors_at_zero() {
        let decision = Coupon::fixed(80).evaluate(Money::from_units(50));

        match decision {
            CouponDecision::Valid {
                discount,
                final_total,
            } => {
                assert_eq!(discount, Money::from_units(80));
                assert_eq!(final_total, Money::zero());
            }
            CouponDecision::Invalid => panic!("expected a valid coupon"),
        }
    }

    #[test]
    fn test_percent_coupon_on_largest_total() {
        let total = Money::new(Decimal::MAX);

        match Coupon::percent(10).evaluate(total) {
            CouponDecision::Valid {
                discount,
                final_total,
            } => {
                assert!(discount < total);
                assert!(final_total < total);
            }
            CouponDecision::Invalid => panic!("expected a valid coupon"),
        }
    }

    #[test]
    fn test_inactive_coupon_is_invalid() {
        let decision = Coupon::percent(20).inactive().evaluate(Money::from_units(200));
        assert_eq!(decision, CouponDecision::Invalid);
        assert!(!decision.is_valid());
    }

    #[test]
    fn test_coupon_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&CouponKind::Percent).unwrap(),
            "\"percent\""
        );
        assert_eq!(serde_json::to_string(&CouponKind::Fixed).unwrap(), "\"fixed\"");
    }
}
