//! Line-item snapshots and order totals using decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MenuItemId;

/// Flat sales tax applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Largest amount a money column (`NUMERIC(10,2)`) can store: 99,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Errors from computing order totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TotalsError {
    /// A component of the totals exceeds [`MAX_AMOUNT`] or overflowed.
    #[error("order total exceeds the maximum of 99999999.99")]
    OutOfRange,
}

/// A frozen copy of a menu item as it was when the order was placed.
///
/// Later price or name changes on the menu do not touch existing snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub item_id: MenuItemId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    /// `price × quantity`, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Money breakdown stored on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Compute totals for a set of line items and a vendor's delivery fee.
    ///
    /// Tax is charged on the subtotal only, never on the delivery fee.
    /// Every component is rounded to cents, midpoint away from zero.
    ///
    /// # Errors
    ///
    /// Returns `TotalsError::OutOfRange` if the arithmetic overflows or any
    /// component exceeds [`MAX_AMOUNT`].
    pub fn compute(items: &[LineItem], delivery_fee: Decimal) -> Result<Self, TotalsError> {
        let raw_subtotal = items.iter().try_fold(Decimal::ZERO, |sum, line| {
            line.line_total().and_then(|amount| sum.checked_add(amount))
        });
        let subtotal = cents(raw_subtotal.ok_or(TotalsError::OutOfRange)?);
        let delivery_fee = cents(delivery_fee);
        let tax = cents(
            subtotal
                .checked_mul(TAX_RATE)
                .ok_or(TotalsError::OutOfRange)?,
        );
        let total = subtotal
            .checked_add(delivery_fee)
            .and_then(|sum| sum.checked_add(tax))
            .ok_or(TotalsError::OutOfRange)?;

        let totals = Self {
            subtotal,
            delivery_fee,
            tax,
            total,
        };
        if [subtotal, delivery_fee, tax, total]
            .iter()
            .any(|amount| !fits_column(*amount))
        {
            return Err(TotalsError::OutOfRange);
        }
        Ok(totals)
    }
}

/// Whether `amount` is storable in a money column once rounded to cents.
#[must_use]
pub fn fits_column(amount: Decimal) -> bool {
    cents(amount).abs() <= MAX_AMOUNT
}

fn cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
