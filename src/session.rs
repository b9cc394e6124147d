use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use tabled::{settings::Style, Table, Tabled};

use crate::config::{Config, Menu};
use crate::error::Result;
use crate::money::format_amount;
use crate::order::{
    Cart, CheckoutFlow, CheckoutState, PathProof, PaymentMethod, PickOutcome, Receipt, TaxPolicy,
};

/// One line typed at the `cafe>` prompt
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "cafe>", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Show the menu
    Menu,

    /// Add one unit of a menu item to the cart
    Add {
        /// Item identifier from menu.toml
        item: String,

        /// Size name for sized items (e.g., large)
        #[arg(short, long)]
        size: Option<String>,
    },

    /// Take one unit of a cart line back out
    Remove {
        /// Line id as shown by 'cart'
        line: String,
    },

    /// Show the cart
    Cart,

    /// Empty the cart
    Clear,

    /// Proceed to payment
    Checkout,

    /// Choose a payment method
    Pay {
        /// cash or gcash
        method: PaymentMethod,
    },

    /// Attach a GCash payment screenshot (no path cancels)
    Proof { path: Option<String> },

    /// Complete the GCash payment once proof is attached
    Confirm,

    /// Show the pending receipt
    Receipt {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Place the order shown on the receipt
    Done,

    /// Go back one step
    Back,

    /// Show where the order is
    Status,

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Tabled)]
struct MenuRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "SIZES")]
    sizes: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

#[derive(Tabled)]
struct CartRow {
    #[tabled(rename = "LINE")]
    line: String,
    #[tabled(rename = "ITEM")]
    item: String,
    #[tabled(rename = "QTY")]
    quantity: u32,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct ReceiptRow {
    #[tabled(rename = "ITEM")]
    item: String,
    #[tabled(rename = "QTY")]
    quantity: u32,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// Render the menu as a table
pub fn menu_table(menu: &Menu, currency_symbol: &str) -> String {
    let rows: Vec<MenuRow> = menu
        .iter()
        .map(|(id, item)| MenuRow {
            id: id.clone(),
            name: item.name.clone(),
            price: format_amount(item.price, currency_symbol),
            sizes: item
                .sizes
                .iter()
                .map(|(size, price)| format!("{size} {}", format_amount(*price, currency_symbol)))
                .collect::<Vec<_>>()
                .join(", "),
            description: item.description.clone().unwrap_or_default(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render a receipt the way it's handed to the customer
pub fn render_receipt(receipt: &Receipt, config: &Config, tax_policy: TaxPolicy) -> String {
    let symbol = &config.checkout.currency_symbol;
    let mut out = String::new();

    out.push_str(&format!("{}\n", config.store.name));
    out.push_str(&format!("{}\n", config.store.address));
    if let Some(phone) = &config.store.phone {
        out.push_str(&format!("Phone: {phone}\n"));
    }
    out.push_str(&format!("Receipt #{}\n", receipt.order_number));
    out.push_str(&format!("{}\n\n", receipt.display_timestamp()));

    let rows: Vec<ReceiptRow> = receipt
        .lines
        .iter()
        .map(|line| ReceiptRow {
            item: line.name.clone(),
            quantity: line.quantity,
            amount: format_amount(line.line_total(), symbol),
        })
        .collect();
    out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    out.push('\n');

    let tax_label = match tax_policy {
        TaxPolicy::Inclusive => "Tax:".to_string(),
        TaxPolicy::Added { .. } => format!("Tax ({}%):", tax_policy.percent().normalize()),
    };
    out.push_str(&format!(
        "{:<12}{:>14}\n",
        "Subtotal:",
        format_amount(receipt.subtotal, symbol)
    ));
    out.push_str(&format!("{:<12}{:>14}\n", tax_label, format_amount(receipt.tax, symbol)));
    out.push_str(&format!(
        "{:<12}{:>14}\n",
        "Total:",
        format_amount(receipt.total, symbol)
    ));
    out.push_str(&format!("Payment:    {}\n\n", receipt.payment_method));
    out.push_str("Thank you for your purchase!");

    out
}

/// An ordering session: one cart, one checkout, driven by typed commands
#[derive(Debug)]
pub struct Session<'a> {
    config: &'a Config,
    menu: &'a Menu,
    cart: Cart,
    checkout: CheckoutFlow,
}

/// Split a shell line into words. `proof` keeps the rest of the line as
/// one path so file names with spaces survive.
fn split_line(line: &str) -> Vec<&str> {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some(("proof", rest)) => vec!["proof", rest.trim()],
        _ => line.split_whitespace().collect(),
    }
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Config, menu: &'a Menu) -> Self {
        Self::with_checkout(config, menu, CheckoutFlow::new(config.tax_policy()))
    }

    pub fn with_checkout(config: &'a Config, menu: &'a Menu, checkout: CheckoutFlow) -> Self {
        Self {
            config,
            menu,
            cart: Cart::new(),
            checkout,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Command errors are reported and the session keeps going; only a
    /// failing reader or writer ends it early.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write, prompt: bool) -> Result<()> {
        writeln!(
            out,
            "Welcome to {}! Type 'menu' to see what's brewing, 'help' for commands.",
            self.config.store.name
        )?;

        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "cafe> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let words = split_line(&line);
            if words.is_empty() {
                continue;
            }

            let command = match ShellLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    writeln!(out, "{}", e.render().to_string().trim_end())?;
                    continue;
                }
            };

            match self.handle(command, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "Error: {e}")?,
            }
        }

        if !self.cart.is_empty() {
            log::debug!("session ended with {} item(s) in the cart", self.cart.item_count());
        }
        Ok(())
    }

    fn handle(&mut self, command: ShellCommand, out: &mut impl Write) -> Result<Flow> {
        let symbol = self.config.checkout.currency_symbol.as_str();
        let tax_policy = self.checkout.tax_policy();

        match command {
            ShellCommand::Menu => {
                writeln!(out, "{}", menu_table(self.menu, symbol))?;
            }
            ShellCommand::Add { item, size } => {
                let selection = self.menu.resolve(&item, size.as_deref())?;
                self.cart
                    .add_item(&selection.line_id, &selection.name, selection.price);
                writeln!(out, "{} has been added to your cart!", selection.name)?;
                writeln!(out, "Cart: {} item(s)", self.cart.item_count())?;
            }
            ShellCommand::Remove { line } => match self.cart.get(&line).map(|l| l.name.clone()) {
                Some(name) => {
                    self.cart.remove_item(&line);
                    let left = self.cart.get(&line).map_or(0, |l| l.quantity);
                    writeln!(out, "Removed one {name} ({left} left)")?;
                }
                None => writeln!(out, "'{line}' is not in your cart.")?,
            },
            ShellCommand::Cart => self.print_cart(out)?,
            ShellCommand::Clear => {
                self.cart.clear();
                writeln!(out, "Cart cleared.")?;
            }
            ShellCommand::Checkout => {
                self.checkout.proceed_to_payment(&self.cart)?;
                self.print_cart(out)?;
                writeln!(out, "Choose a payment method: 'pay cash' or 'pay gcash'")?;
            }
            ShellCommand::Pay { method } => {
                let receipt = self.checkout.select_method(&self.cart, method)?;
                match method {
                    PaymentMethod::Cash => {
                        writeln!(
                            out,
                            "{}",
                            render_receipt(receipt, self.config, tax_policy)
                        )?;
                        writeln!(out, "Type 'done' to place your order.")?;
                    }
                    PaymentMethod::GCash => {
                        let gcash = &self.config.gcash;
                        writeln!(out, "GCash Payment")?;
                        writeln!(out, "Total: {}", format_amount(receipt.total, symbol))?;
                        writeln!(out, "  GCash Number: {}", gcash.number)?;
                        writeln!(out, "  Account Name: {}", gcash.account_name)?;
                        writeln!(
                            out,
                            "Send the payment, then attach the screenshot with 'proof <path>'."
                        )?;
                    }
                }
            }
            ShellCommand::Proof { path } => {
                let mut picker = PathProof::new(path.as_deref());
                match self.checkout.request_proof(&mut picker)? {
                    PickOutcome::Picked(_) => {
                        writeln!(out, "Receipt uploaded successfully!")?;
                        writeln!(out, "Type 'confirm' to complete the payment.")?;
                    }
                    PickOutcome::Cancelled => writeln!(out, "No image selected.")?,
                    PickOutcome::PermissionDenied => writeln!(
                        out,
                        "Permission Required: Please allow access to your photos to upload a receipt."
                    )?,
                }
            }
            ShellCommand::Confirm => {
                let receipt = self.checkout.complete_gcash_payment()?;
                writeln!(
                    out,
                    "{}",
                    render_receipt(receipt, self.config, tax_policy)
                )?;
                writeln!(out, "Type 'done' to place your order.")?;
            }
            ShellCommand::Receipt { json } => match self.checkout.pending_receipt() {
                Some(receipt) if json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(receipt)?)?;
                }
                Some(receipt) => writeln!(
                    out,
                    "{}",
                    render_receipt(receipt, self.config, tax_policy)
                )?,
                None => writeln!(out, "No receipt yet. Choose a payment method first.")?,
            },
            ShellCommand::Done => {
                let receipt = self.checkout.complete_order(&mut self.cart)?;
                writeln!(out, "Thank You! Your order has been placed. Enjoy your coffee!")?;
                writeln!(
                    out,
                    "Order {} - {}",
                    receipt.order_number,
                    format_amount(receipt.total, symbol)
                )?;
            }
            ShellCommand::Back => {
                self.checkout.back();
                writeln!(out, "Now {}.", self.checkout.state())?;
            }
            ShellCommand::Status => {
                writeln!(out, "Now {}.", self.checkout.state())?;
                writeln!(
                    out,
                    "Cart: {} item(s), {}",
                    self.cart.item_count(),
                    format_amount(self.cart.subtotal(), symbol)
                )?;
                if let CheckoutState::AwaitingProof { proof: Some(p), .. } = self.checkout.state() {
                    writeln!(out, "Proof: {}", p.path().display())?;
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn print_cart(&self, out: &mut impl Write) -> Result<()> {
        let symbol = self.config.checkout.currency_symbol.as_str();

        if self.cart.is_empty() {
            writeln!(out, "Your cart is empty.")?;
            return Ok(());
        }

        let rows: Vec<CartRow> = self
            .cart
            .snapshot()
            .iter()
            .map(|line| CartRow {
                line: line.id.clone(),
                item: line.name.clone(),
                quantity: line.quantity,
                price: format_amount(line.unit_price, symbol),
                amount: format_amount(line.line_total(), symbol),
            })
            .collect();

        writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;
        writeln!(out, "Subtotal: {}", format_amount(self.cart.subtotal(), symbol))?;
        Ok(())
    }
}
