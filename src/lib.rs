pub mod config;
pub mod delivery;
pub mod error;
pub mod money;
pub mod order;
pub mod session;

pub use config::{Config, Menu, MenuItem};
pub use error::{CafeError, Result};
pub use order::{Cart, CartLine, CheckoutFlow, CheckoutState, PaymentMethod, Receipt, TaxPolicy};
