mod cart;
mod checkout;
mod proof;
mod receipt;

pub use cart::{Cart, CartLine};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutState};
pub use proof::{PathProof, PickOutcome, ProofRef, ProofSource};
pub use receipt::{PaymentMethod, Receipt, TaxPolicy, DEFAULT_TAX_POLICY};
