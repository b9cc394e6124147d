mod menu;
mod store;

pub use menu::{Menu, MenuItem, Selection};
pub use store::{CheckoutSettings, Config, GcashAccount, Store};

use crate::delivery::{Delivery, DeliveryFile};
use crate::error::{CafeError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.cafe/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "cafe") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.cafe/
    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        CafeError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".cafe"))
}

/// Fail early with a hint when `cafe init` hasn't been run
pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        return Err(CafeError::ConfigNotFound(config_dir.to_path_buf()));
    }
    Ok(())
}

fn load_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(CafeError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    log::debug!("loading {}", path.display());
    toml::from_str(&content).map_err(|e| CafeError::ConfigParse { path, source: e })
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    let config: Config = load_toml(path.clone())?;
    config
        .validate()
        .map_err(|reason| CafeError::InvalidConfigValue { path, reason })?;
    Ok(config)
}

/// Load menu.toml
pub fn load_menu(config_dir: &Path) -> Result<Menu> {
    let path = config_dir.join("menu.toml");
    let menu: Menu = load_toml(path.clone())?;
    menu.validate()
        .map_err(|reason| CafeError::InvalidConfigValue { path, reason })?;
    Ok(menu)
}

/// Load deliveries.toml (empty if missing)
pub fn load_deliveries(config_dir: &Path) -> Result<Vec<Delivery>> {
    let path = config_dir.join("deliveries.toml");
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file: DeliveryFile = load_toml(path)?;
    Ok(file.deliveries)
}

/// Save deliveries.toml
pub fn save_deliveries(config_dir: &Path, deliveries: Vec<Delivery>) -> Result<()> {
    let path = config_dir.join("deliveries.toml");
    let content = toml::to_string_pretty(&DeliveryFile { deliveries }).map_err(|e| {
        CafeError::ConfigWrite {
            path: path.clone(),
            reason: e.to_string(),
        }
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[store]
name = "Holy Cup"
address = "341 Real St, Dumaguete, 6200 Negros Oriental"
phone = "0976 006 3169"    # optional

[checkout]
currency_symbol = "₱"
tax_rate = 0.0   # 0 means menu prices include tax; e.g., 0.08 adds 8% on top

[gcash]
number = "0917 123 4567"
account_name = "Holy Cup Coffee"
"#;

/// Template content for menu.toml
pub const MENU_TEMPLATE: &str = r#"# Define your menu here. The table name (e.g., [espresso]) is used
# as the item identifier in the order session.
#
# Example:
#   cafe> add latte --size large

[espresso]
name = "Espresso"
description = "Rich and strong espresso shot."
price = 175.00

[cappuccino]
name = "Cappuccino"
description = "Espresso with steamed milk and foam."
price = 225.00

[latte]
name = "Latte"
description = "Espresso with steamed milk."
price = 240.00

[latte.sizes]   # optional, size name = price
Regular = 240.00
Large = 280.00

[mocha]
name = "Mocha"
description = "Espresso with chocolate and steamed milk."
price = 265.00

[americano]
name = "Americano"
description = "Espresso with hot water."
price = 185.00

[macchiato]
name = "Macchiato"
description = "Espresso with a dash of foamed milk."
price = 215.00
"#;

/// Template content for deliveries.toml
pub const DELIVERIES_TEMPLATE: &str = r#"# Deliveries assigned to the rider. 'cafe deliver' updates this file.

[[delivery]]
id = "1"
customer = "John Doe"
address = "123 Coffee St., Dumaguete City"
phone_number = "+63 917 123 4567"
status = "Pending"
time = "10:30 AM"
estimated_delivery = "11:15 AM"
payment_method = "COD"
items = [
    { id = "1-1", name = "Espresso", quantity = 2, price = 175.00 },
    { id = "1-2", name = "Croissant", quantity = 1, price = 95.00 },
]

[[delivery]]
id = "2"
customer = "Jane Smith"
address = "456 Brew Ave., Bantayan"
phone_number = "+63 945 678 9012"
status = "Ongoing"
time = "11:15 AM"
estimated_delivery = "11:45 AM"
payment_method = "GCash"
items = [
    { id = "2-1", name = "Cappuccino", quantity = 1, price = 225.00 },
    { id = "2-2", name = "Chocolate Muffin", quantity = 2, price = 85.00 },
]

[[delivery]]
id = "3"
customer = "Michael Brown"
address = "789 Latte Rd., Sibulan"
phone_number = "+63 908 765 4321"
status = "Completed"
time = "09:45 AM"
estimated_delivery = "10:30 AM"
payment_method = "COD"
items = [
    { id = "3-1", name = "Americano", quantity = 3, price = 185.00 },
]

[[delivery]]
id = "4"
customer = "Emily Davis"
address = "101 Espresso Blvd., Valencia"
phone_number = "+63 927 456 7890"
status = "Pending"
time = "12:00 PM"
estimated_delivery = "12:45 PM"
payment_method = "GCash"
items = [
    { id = "4-1", name = "Latte", quantity = 2, price = 240.00 },
    { id = "4-2", name = "Blueberry Cheesecake", quantity = 1, price = 150.00 },
    { id = "4-3", name = "Ham & Cheese Sandwich", quantity = 1, price = 175.00 },
]
"#;
