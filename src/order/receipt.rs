use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::cart::CartLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    GCash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::GCash => write!(f, "GCash"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "gcash" => Ok(PaymentMethod::GCash),
            other => Err(format!("unknown payment method '{other}' (use cash or gcash)")),
        }
    }
}

/// How tax is applied on top of the cart subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxPolicy {
    /// Listed prices already include tax
    Inclusive,
    /// `rate` (e.g. 0.08) is added on top of the subtotal
    Added { rate: Decimal },
}

/// Menu prices include tax unless `tax_rate` is configured.
pub const DEFAULT_TAX_POLICY: TaxPolicy = TaxPolicy::Inclusive;

impl TaxPolicy {
    /// Policy for a configured rate; zero keeps the inclusive default.
    pub fn from_rate(rate: Decimal) -> Self {
        if rate.is_zero() {
            DEFAULT_TAX_POLICY
        } else {
            TaxPolicy::Added { rate }
        }
    }

    pub fn tax_on(&self, subtotal: Decimal) -> Decimal {
        match *self {
            TaxPolicy::Inclusive => Decimal::ZERO,
            TaxPolicy::Added { rate } => subtotal * rate,
        }
    }

    /// Rate as a percentage for display (0 for inclusive)
    pub fn percent(&self) -> Decimal {
        match *self {
            TaxPolicy::Inclusive => Decimal::ZERO,
            TaxPolicy::Added { rate } => rate * Decimal::ONE_HUNDRED,
        }
    }
}

/// Frozen record of a checkout, built when a payment method is chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_number: String,
    pub timestamp: NaiveDateTime,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl Receipt {
    pub fn build(
        lines: &[CartLine],
        payment_method: PaymentMethod,
        tax_policy: TaxPolicy,
        order_number: String,
        timestamp: NaiveDateTime,
    ) -> Self {
        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let tax = tax_policy.tax_on(subtotal);

        Self {
            order_number,
            timestamp,
            payment_method,
            lines: lines.to_vec(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Timestamp as shown on the receipt, e.g. "03/14/2026 09:05:12 AM"
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format("%m/%d/%Y %I:%M:%S %p").to_string()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
