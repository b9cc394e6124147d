use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::TaxPolicy;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub store: Store,
    #[serde(default)]
    pub checkout: CheckoutSettings,
    pub gcash: GcashAccount,
}

impl Config {
    pub fn tax_policy(&self) -> TaxPolicy {
        TaxPolicy::from_rate(self.checkout.tax_rate)
    }

    /// Check values serde can't: the tax rate must not be negative.
    pub fn validate(&self) -> Result<(), String> {
        if self.checkout.tax_rate < Decimal::ZERO {
            return Err(format!(
                "[checkout] tax_rate must be 0 or more, got {}",
                self.checkout.tax_rate
            ));
        }
        Ok(())
    }
}

/// Header printed on every receipt
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Store {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// 0 means menu prices already include tax
    #[serde(default)]
    pub tax_rate: Decimal,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            tax_rate: Decimal::ZERO,
        }
    }
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}

/// Where customers send GCash payments
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcashAccount {
    pub number: String,
    pub account_name: String,
}
