use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cafe_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("cafe"))
}

fn init(config_path: &Path) {
    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

#[test]
fn test_help() {
    cafe_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Café ordering and delivery dashboard"));
}

#[test]
fn test_version() {
    cafe_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cafe"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized cafe config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("menu.toml").exists());
    assert!(config_path.join("deliveries.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_menu_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "menu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_menu_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "menu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("espresso"))
        .stdout(predicate::str::contains("Rich and strong espresso shot."))
        .stdout(predicate::str::contains("₱175.00"))
        .stdout(predicate::str::contains("Large ₱280.00"));
}

#[test]
fn test_order_cash_flow() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "order"])
        .write_stdin("add espresso\nadd espresso\ncheckout\npay cash\ndone\ncart\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Espresso has been added to your cart!"))
        .stdout(predicate::str::contains("Holy Cup"))
        .stdout(predicate::str::is_match(r"Receipt #ORD-\d{6}").unwrap())
        .stdout(predicate::str::contains("₱350.00"))
        .stdout(predicate::str::contains("Thank You! Your order has been placed."))
        .stdout(predicate::str::contains("Your cart is empty."));
}

#[test]
fn test_order_added_tax() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    let config_file = config_path.join("config.toml");
    let config = fs::read_to_string(&config_file)
        .unwrap()
        .replace("tax_rate = 0.0", "tax_rate = 0.08");
    fs::write(&config_file, config).unwrap();

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "order"])
        .write_stdin("add espresso\nadd espresso\npay cash\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tax (8%):"))
        .stdout(predicate::str::contains("₱378.00"));
}

#[test]
fn test_order_empty_cart_checkout() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "order"])
        .write_stdin("checkout\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Cart is empty."))
        .stdout(predicate::str::contains("Now browsing the menu."));
}

#[test]
fn test_order_gcash_flow() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");
    let screenshot = temp_dir.path().join("gcash.png");

    init(&config_path);
    fs::write(&screenshot, b"png").unwrap();

    let script = format!(
        "add latte --size large\npay gcash\nconfirm\nproof\nproof {}\nconfirm\ndone\n",
        screenshot.display()
    );

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "order"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("GCash Number: 0917 123 4567"))
        .stdout(predicate::str::contains("Error: Upload your GCash payment receipt"))
        .stdout(predicate::str::contains("No image selected."))
        .stdout(predicate::str::contains("Receipt uploaded successfully!"))
        .stdout(predicate::str::contains("Latte (Large)"))
        .stdout(predicate::str::contains("Payment:    GCash"))
        .stdout(predicate::str::contains("Enjoy your coffee!"));
}

#[test]
fn test_order_unknown_item() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "order"])
        .write_stdin("add tea\nadd latte --size venti\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Item 'tea' not found"))
        .stdout(predicate::str::contains("Size 'venti' is not offered"));
}

#[test]
fn test_deliveries_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "deliveries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("₱445.00"))
        .stdout(predicate::str::contains("COD"))
        .stdout(predicate::str::contains("Pending: 2  Ongoing: 1  Completed: 1"));

    cafe_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "deliveries",
            "--status",
            "ongoing",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith"))
        .stdout(predicate::str::contains("John Doe").not());
}

#[test]
fn test_delivery_detail() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "delivery", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emily Davis"))
        .stdout(predicate::str::contains("Ham & Cheese Sandwich"))
        .stdout(predicate::str::contains("₱805.00"));
}

#[test]
fn test_deliver_cod_requires_full_cash() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");

    init(&config_path);

    cafe_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "deliver",
            "1",
            "--cash",
            "400",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("collect the full payment amount"));

    cafe_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "deliver",
            "1",
            "--cash",
            "500",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Order #1 has been successfully delivered to John Doe!",
        ))
        .stdout(predicate::str::contains("Change: ₱55.00"));

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "deliveries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending: 1  Ongoing: 1  Completed: 2"));

    cafe_cmd()
        .args(["-C", config_path.to_str().unwrap(), "deliver", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already completed"));
}

#[test]
fn test_deliver_gcash_with_photo() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafe-config");
    let photo = temp_dir.path().join("doorstep.jpg");

    init(&config_path);
    fs::write(&photo, b"jpg").unwrap();

    cafe_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "deliver",
            "2",
            "--photo",
            photo.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("delivered to Jane Smith"))
        .stdout(predicate::str::contains("doorstep.jpg"));

    let saved = fs::read_to_string(config_path.join("deliveries.toml")).unwrap();
    assert!(saved.contains("doorstep.jpg"));
}
