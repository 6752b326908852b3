//! Cart entity.

use common::{Money, Sku};

use crate::error::CartError;

/// A validated, strictly positive item quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    /// Validates a raw quantity from a request.
    pub fn new(quantity: i64) -> Result<Self, CartError> {
        match u32::try_from(quantity) {
            Ok(q) if q > 0 => Ok(Self(q)),
            _ => Err(CartError::InvalidQuantity { quantity }),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// One SKU's quantity and captured unit price within a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub sku: Sku,
    pub qty: u32,
    /// Unit price captured when the SKU was first added.
    pub price: Money,
}

impl LineItem {
    /// Returns `qty * price`, or `None` if it is out of range.
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_mul(self.qty)
    }
}

/// A coupon accepted by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCoupon {
    pub code: String,
    pub discount: Money,
}

/// Whether the cart's current subtotal carries a discount.
///
/// The coupon and the discounted total only exist together, and only for
/// the subtotal they were computed against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CartPricing {
    /// Subtotal only.
    #[default]
    Priced,

    /// A validated coupon applies to the current subtotal.
    Discounted {
        coupon: AppliedCoupon,
        final_total: Money,
    },
}

/// A user's shopping cart.
///
/// Items are unique by SKU and keep insertion order. `total` is derived
/// from the items and recomputed on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
    total: Money,
    pricing: CartPricing,
}

// Query methods
impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the line for a SKU.
    pub fn get_item(&self, sku: &Sku) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.sku == sku)
    }

    /// Returns the subtotal before any discount.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn pricing(&self) -> &CartPricing {
        &self.pricing
    }

    /// Returns the applied coupon, if the current subtotal has one.
    pub fn coupon(&self) -> Option<&AppliedCoupon> {
        match &self.pricing {
            CartPricing::Discounted { coupon, .. } => Some(coupon),
            CartPricing::Priced => None,
        }
    }

    /// Returns the discounted total, if a coupon applies.
    pub fn final_total(&self) -> Option<Money> {
        match &self.pricing {
            CartPricing::Discounted { final_total, .. } => Some(*final_total),
            CartPricing::Priced => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }
}

// Mutations
impl Cart {
    /// Adds `qty` units of `sku` at `price`.
    ///
    /// An existing line keeps its original price and only accumulates
    /// quantity. Any applied coupon is dropped because the subtotal it was
    /// computed against no longer holds. On error the cart is unchanged.
    pub fn add_item(&mut self, sku: Sku, qty: Quantity, price: Money) -> Result<(), CartError> {
        let mut items = self.items.clone();
        if let Some(existing) = items.iter_mut().find(|item| item.sku == sku) {
            let current = existing.qty;
            existing.qty = current
                .checked_add(qty.get())
                .ok_or(CartError::InvalidQuantity {
                    quantity: i64::from(current) + i64::from(qty.get()),
                })?;
        } else {
            items.push(LineItem {
                sku: sku.clone(),
                qty: qty.get(),
                price,
            });
        }

        let total = sum_lines(&items).ok_or(CartError::TotalOutOfRange { sku })?;
        self.items = items;
        self.total = total;
        self.pricing = CartPricing::Priced;
        Ok(())
    }

    /// Records a validated coupon against the current subtotal.
    ///
    /// `final_total` is taken as given; replaces any earlier coupon.
    pub fn apply_coupon(&mut self, coupon: AppliedCoupon, final_total: Money) {
        self.pricing = CartPricing::Discounted {
            coupon,
            final_total,
        };
    }
}

fn sum_lines(items: &[LineItem]) -> Option<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |total, item| total.checked_add(item.line_total()?))
}
