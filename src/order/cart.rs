use rust_decimal::Decimal;
use serde::Serialize;

/// One distinct item/size combination in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The current order's line items.
///
/// Lines keep insertion order. Mutation only goes through [`Cart::add_item`],
/// [`Cart::remove_item`] and [`Cart::clear`], so there is never more than one
/// line per id and every line has a quantity of at least one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit, merging with an existing line of the same id
    pub fn add_item(&mut self, id: &str, name: &str, unit_price: Decimal) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.quantity += 1;
            log::debug!("cart: {} quantity -> {}", id, line.quantity);
            return;
        }

        self.lines.push(CartLine {
            id: id.to_string(),
            name: name.to_string(),
            unit_price,
            quantity: 1,
        });
        log::debug!("cart: added line {id}");
    }

    /// Take back one unit of `id`. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &str) {
        let Some(pos) = self.lines.iter().position(|l| l.id == id) else {
            log::debug!("cart: remove of unknown line {id} ignored");
            return;
        };

        let line = &mut self.lines[pos];
        if line.quantity <= 1 {
            self.lines.remove(pos);
            log::debug!("cart: removed line {id}");
        } else {
            line.quantity -= 1;
            log::debug!("cart: {} quantity -> {}", id, line.quantity);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        log::debug!("cart: cleared");
    }

    pub fn snapshot(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines (the cart badge count)
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn espresso() -> Decimal {
        Decimal::from(175)
    }

    fn assert_invariants(cart: &Cart) {
        let lines = cart.snapshot();
        for (i, line) in lines.iter().enumerate() {
            assert!(line.quantity >= 1, "line {} has quantity 0", line.id);
            assert!(
                lines.iter().skip(i + 1).all(|other| other.id != line.id),
                "duplicate line {}",
                line.id
            );
        }
    }

    #[test]
    fn repeated_add_merges_quantity() {
        let mut cart = Cart::new();
        cart.add_item("e1", "Espresso", espresso());
        cart.add_item("e1", "Espresso", espresso());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("e1").unwrap().quantity, 2);
        assert_eq!(cart.subtotal(), Decimal::from(350));
    }

    #[test]
    fn remove_takes_one_unit_at_a_time() {
        let mut cart = Cart::new();
        cart.add_item("e1", "Espresso", espresso());
        cart.add_item("e1", "Espresso", espresso());

        cart.remove_item("e1");
        assert_eq!(cart.get("e1").unwrap().quantity, 1);

        cart.remove_item("e1");
        assert!(cart.get("e1").is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item("e1", "Espresso", espresso());
        let before = cart.clone();

        cart.remove_item("nope");
        assert_eq!(cart, before);
    }

    #[test]
    fn add_then_remove_restores_cart() {
        let mut cart = Cart::new();
        cart.add_item("e1", "Espresso", espresso());
        cart.add_item("l1-Large", "Latte (Large)", Decimal::from(280));

        for id in ["e1", "l1-Large", "m1"] {
            let before = cart.clone();
            cart.add_item(id, "Something", Decimal::from(100));
            cart.remove_item(id);
            assert_eq!(cart, before);
        }
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());

        cart.add_item("e1", "Espresso", espresso());
        cart.add_item("c1", "Cappuccino", Decimal::from(225));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn mixed_sequence_keeps_invariants() {
        let mut cart = Cart::new();
        let ids = ["a", "b", "c"];

        // Deterministic pseudo-random walk over add/remove
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = ids[(seed >> 16) as usize % ids.len()];
            if (seed >> 8) % 3 == 0 {
                cart.remove_item(id);
            } else {
                cart.add_item(id, id, Decimal::ONE);
            }
            assert_invariants(&cart);
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item("b", "B", Decimal::ONE);
        cart.add_item("a", "A", Decimal::ONE);
        cart.add_item("b", "B", Decimal::ONE);

        let ids: Vec<&str> = cart.snapshot().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(cart.item_count(), 3);
    }
}
