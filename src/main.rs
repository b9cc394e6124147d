use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use cafe::config::{
    config_dir, ensure_config_dir, load_config, load_deliveries, load_menu, save_deliveries,
    CONFIG_TEMPLATE, DELIVERIES_TEMPLATE, MENU_TEMPLATE,
};
use cafe::delivery::{DeliveryBoard, DeliveryPayment, DeliveryStatus};
use cafe::error::{CafeError, Result};
use cafe::money::{format_amount, parse_amount};
use cafe::order::{PathProof, ProofSource};
use cafe::session::{menu_table, Session};

#[derive(Parser)]
#[command(name = "cafe")]
#[command(version, about = "Café ordering and delivery dashboard", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.cafe or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Show the menu
    Menu,

    /// Start an ordering session (reads commands from stdin)
    Order,

    /// List assigned deliveries
    Deliveries {
        /// Only show deliveries with this status (pending, ongoing, completed)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show the details of one delivery
    Delivery {
        /// Delivery id from 'deliveries'
        id: String,
    },

    /// Mark a delivery as delivered
    Deliver {
        /// Delivery id from 'deliveries'
        id: String,

        /// Cash collected from the customer (required for COD orders)
        #[arg(long, value_name = "AMOUNT")]
        cash: Option<String>,

        /// Photo taken as proof of delivery
        #[arg(long, value_name = "PATH")]
        photo: Option<String>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    log::debug!("config directory: {}", cfg_dir.display());

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Menu => cmd_menu(&cfg_dir),
        Commands::Order => cmd_order(&cfg_dir),
        Commands::Deliveries { status } => cmd_deliveries(&cfg_dir, status.as_deref()),
        Commands::Delivery { id } => cmd_delivery(&cfg_dir, &id),
        Commands::Deliver { id, cash, photo } => {
            cmd_deliver(&cfg_dir, &id, cash.as_deref(), photo.as_deref())
        }
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(CafeError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("menu.toml"), MENU_TEMPLATE)?;
    fs::write(cfg_dir.join("deliveries.toml"), DELIVERIES_TEMPLATE)?;

    println!("Initialized cafe config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your store details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Set up the menu:          $EDITOR {}/menu.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then start taking orders:");
    println!("  cafe order");

    Ok(())
}

/// Show the menu
fn cmd_menu(cfg_dir: &Path) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let menu = load_menu(cfg_dir)?;

    if menu.is_empty() {
        println!("No menu items configured.");
        println!("Add items to: {}/menu.toml", cfg_dir.display());
        return Ok(());
    }

    println!("{}", menu_table(&menu, &config.checkout.currency_symbol));
    Ok(())
}

/// Run an interactive ordering session on stdin/stdout
fn cmd_order(cfg_dir: &Path) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let menu = load_menu(cfg_dir)?;

    let stdin = std::io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = std::io::stdout();

    let mut session = Session::new(&config, &menu);
    session.run(stdin.lock(), &mut stdout, prompt)
}

#[derive(Tabled)]
struct DeliveryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "TIME")]
    time: String,
    #[tabled(rename = "ETA")]
    eta: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "PAYMENT")]
    payment: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct DeliveryItemRow {
    #[tabled(rename = "ITEM")]
    name: String,
    #[tabled(rename = "QTY")]
    quantity: u32,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// List deliveries with per-status counts
fn cmd_deliveries(cfg_dir: &Path, status: Option<&str>) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let board = DeliveryBoard::new(load_deliveries(cfg_dir)?);
    let symbol = &config.checkout.currency_symbol;

    let filter = status.map(str::parse::<DeliveryStatus>).transpose()?;

    let rows: Vec<DeliveryRow> = board
        .list()
        .iter()
        .filter(|d| filter.map_or(true, |s| d.status == s))
        .map(|d| DeliveryRow {
            id: d.id.clone(),
            customer: d.customer.clone(),
            time: d.time.clone(),
            eta: d.estimated_delivery.clone(),
            total: format_amount(d.total(), symbol),
            payment: d.payment_method.to_string(),
            status: d.status.to_string(),
        })
        .collect();

    if rows.is_empty() {
        println!("No deliveries to show.");
    } else {
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    let counts = board.counts();
    println!();
    println!(
        "Pending: {}  Ongoing: {}  Completed: {}",
        counts.pending, counts.ongoing, counts.completed
    );

    Ok(())
}

/// Show one delivery in detail
fn cmd_delivery(cfg_dir: &Path, id: &str) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let board = DeliveryBoard::new(load_deliveries(cfg_dir)?);
    let symbol = &config.checkout.currency_symbol;
    let delivery = board.get(id)?;

    println!("Order #{} ({})", delivery.id, delivery.status);
    println!("{}", "-".repeat(50));
    println!("Customer:  {}", delivery.customer);
    println!("Address:   {}", delivery.address);
    println!("Phone:     {}", delivery.phone_number);
    println!("Ordered:   {}", delivery.time);
    println!("ETA:       {}", delivery.estimated_delivery);
    println!("Payment:   {}", delivery.payment_method);
    println!();

    let rows: Vec<DeliveryItemRow> = delivery
        .items
        .iter()
        .map(|item| DeliveryItemRow {
            name: item.name.clone(),
            quantity: item.quantity,
            amount: format_amount(
                item.price * rust_decimal::Decimal::from(item.quantity),
                symbol,
            ),
        })
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("Total:     {}", format_amount(delivery.total(), symbol));

    if delivery.payment_method == DeliveryPayment::Cod
        && delivery.status != DeliveryStatus::Completed
    {
        println!("Collect cash on delivery: 'cafe deliver {} --cash <amount>'", delivery.id);
    }

    Ok(())
}

/// Complete a delivery and save the board
fn cmd_deliver(cfg_dir: &Path, id: &str, cash: Option<&str>, photo: Option<&str>) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let mut board = DeliveryBoard::new(load_deliveries(cfg_dir)?);
    let symbol = &config.checkout.currency_symbol;

    let cash_received = cash.map(parse_amount).transpose()?;
    let mut camera = photo.map(|p| PathProof::new(Some(p)));

    let completion = board.complete(
        id,
        cash_received,
        camera.as_mut().map(|c| c as &mut dyn ProofSource),
    )?;
    save_deliveries(cfg_dir, board.into_deliveries())?;

    println!(
        "Order #{} has been successfully delivered to {}!",
        completion.id, completion.customer
    );
    println!("  Total:  {}", format_amount(completion.total, symbol));
    if cash_received.is_some() {
        println!("  Change: {}", format_amount(completion.change, symbol));
    }
    if let Some(proof) = &completion.proof {
        println!("  Photo:  {}", proof.path().display());
    } else if photo.is_some() {
        println!("  Photo:  not attached");
    }

    Ok(())
}
