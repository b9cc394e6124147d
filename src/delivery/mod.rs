mod board;

pub use board::{DeliveryBoard, DeliveryCompletion, StatusCounts};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CafeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Pending,
    Ongoing,
    Completed,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Pending => write!(f, "PENDING"),
            DeliveryStatus::Ongoing => write!(f, "ONGOING"),
            DeliveryStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = CafeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(DeliveryStatus::Pending),
            "ongoing" => Ok(DeliveryStatus::Ongoing),
            "completed" => Ok(DeliveryStatus::Completed),
            _ => Err(CafeError::InvalidStatus(s.to_string())),
        }
    }
}

/// How the customer pays the rider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryPayment {
    /// Paid up front through GCash
    GCash,
    /// Cash on delivery
    #[serde(rename = "COD")]
    Cod,
}

impl fmt::Display for DeliveryPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryPayment::GCash => write!(f, "GCash"),
            DeliveryPayment::Cod => write!(f, "COD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: String,
    pub customer: String,
    pub address: String,
    pub phone_number: String,
    pub status: DeliveryStatus,
    pub time: String,
    pub estimated_delivery: String,
    pub payment_method: DeliveryPayment,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub cash_received: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_photo: Option<PathBuf>,
    #[serde(default)]
    pub items: Vec<DeliveryItem>,
}

impl Delivery {
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum()
    }
}

/// Layout of deliveries.toml
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeliveryFile {
    #[serde(default, rename = "delivery")]
    pub deliveries: Vec<Delivery>,
}
