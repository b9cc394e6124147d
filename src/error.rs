use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

use crate::order::CheckoutError;

#[derive(Error, Debug)]
pub enum CafeError {
    #[error("Config directory not found at {0}. Run 'cafe init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value in {path}: {reason}")]
    InvalidConfigValue { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    ConfigWrite { path: PathBuf, reason: String },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Item '{0}' not found in menu.toml")]
    ItemNotFound(String),

    #[error("Size '{size}' is not offered for '{item}' (available: {available})")]
    SizeNotFound {
        item: String,
        size: String,
        available: String,
    },

    #[error("Delivery '{0}' not found in deliveries.toml")]
    DeliveryNotFound(String),

    #[error("Delivery '{0}' is already completed")]
    DeliveryAlreadyCompleted(String),

    #[error("Please collect the full payment amount before completing delivery ({required:.2} due, {received:.2} received)")]
    InsufficientCash { required: Decimal, received: Decimal },

    #[error("Invalid amount '{0}'. Expected a non-negative number (e.g., '500' or '445.50')")]
    InvalidAmount(String),

    #[error("Invalid delivery status '{0}'. Use 'pending', 'ongoing', or 'completed'.")]
    InvalidStatus(String),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CafeError>;
