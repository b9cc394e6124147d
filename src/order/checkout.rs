use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use thiserror::Error;

use super::cart::Cart;
use super::proof::{PickOutcome, ProofRef, ProofSource};
use super::receipt::{PaymentMethod, Receipt, TaxPolicy, DEFAULT_TAX_POLICY};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart is empty. Please add items to your cart before proceeding to payment.")]
    EmptyCart,

    #[error("Upload your GCash payment receipt before completing the payment.")]
    ProofRequired,

    #[error("Cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: String },
}

/// Where an order is in the checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    MethodSelection,
    /// GCash chosen; waiting for a payment screenshot
    AwaitingProof {
        receipt: Receipt,
        proof: Option<ProofRef>,
    },
    ReceiptShown {
        receipt: Receipt,
    },
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutState::Idle => write!(f, "browsing the menu"),
            CheckoutState::MethodSelection => write!(f, "choosing a payment method"),
            CheckoutState::AwaitingProof { proof: None, .. } => {
                write!(f, "waiting for GCash payment proof")
            }
            CheckoutState::AwaitingProof { proof: Some(_), .. } => {
                write!(f, "GCash proof uploaded, awaiting confirmation")
            }
            CheckoutState::ReceiptShown { .. } => write!(f, "showing the receipt"),
        }
    }
}

/// Drives one cart from payment-method selection to a finished receipt.
///
/// The flow never owns the cart; callers lend it for the transitions that
/// read or clear it.
#[derive(Debug)]
pub struct CheckoutFlow {
    state: CheckoutState,
    tax_policy: TaxPolicy,
    rng: StdRng,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_POLICY)
    }
}

impl CheckoutFlow {
    pub fn new(tax_policy: TaxPolicy) -> Self {
        Self::with_rng(tax_policy, StdRng::from_entropy())
    }

    pub fn with_rng(tax_policy: TaxPolicy, rng: StdRng) -> Self {
        Self {
            state: CheckoutState::Idle,
            tax_policy,
            rng,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn tax_policy(&self) -> TaxPolicy {
        self.tax_policy
    }

    /// Receipt waiting to be paid or acknowledged, if any
    pub fn pending_receipt(&self) -> Option<&Receipt> {
        match &self.state {
            CheckoutState::AwaitingProof { receipt, .. } | CheckoutState::ReceiptShown { receipt } => {
                Some(receipt)
            }
            _ => None,
        }
    }

    pub fn proof(&self) -> Option<&ProofRef> {
        match &self.state {
            CheckoutState::AwaitingProof { proof, .. } => proof.as_ref(),
            _ => None,
        }
    }

    pub fn receipt_uploaded(&self) -> bool {
        self.proof().is_some()
    }

    pub fn proceed_to_payment(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            log::warn!("checkout: proceed rejected, cart is empty");
            return Err(CheckoutError::EmptyCart);
        }

        match self.state {
            CheckoutState::Idle => {
                self.state = CheckoutState::MethodSelection;
                log::debug!("checkout: idle -> method selection");
                Ok(())
            }
            CheckoutState::MethodSelection => Ok(()),
            _ => Err(self.reject("proceed to payment")),
        }
    }

    /// Freeze the cart into a receipt for `method`.
    ///
    /// Selecting again replaces whatever receipt was pending.
    pub fn select_method(
        &mut self,
        cart: &Cart,
        method: PaymentMethod,
    ) -> Result<&Receipt, CheckoutError> {
        if cart.is_empty() {
            log::warn!("checkout: {method} selected with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let receipt = Receipt::build(
            cart.snapshot(),
            method,
            self.tax_policy,
            self.next_order_number(),
            Local::now().naive_local(),
        );
        log::debug!(
            "checkout: {} selected, {} total {}",
            method,
            receipt.order_number,
            receipt.total
        );

        self.state = match method {
            PaymentMethod::Cash => CheckoutState::ReceiptShown { receipt },
            PaymentMethod::GCash => CheckoutState::AwaitingProof {
                receipt,
                proof: None,
            },
        };

        self.pending_receipt()
            .ok_or_else(|| self.reject("select a payment method"))
    }

    /// Record the payment screenshot. Completion is still a separate step.
    pub fn attach_proof(&mut self, image: ProofRef) -> Result<(), CheckoutError> {
        if let CheckoutState::AwaitingProof { proof, .. } = &mut self.state {
            log::debug!("checkout: proof attached ({})", image.path().display());
            *proof = Some(image);
            return Ok(());
        }

        Err(self.reject("attach payment proof"))
    }

    /// Ask `source` for a proof image. Cancelling or a refused permission
    /// leaves the flow where it was.
    pub fn request_proof(
        &mut self,
        source: &mut impl ProofSource,
    ) -> Result<PickOutcome, CheckoutError> {
        if !matches!(self.state, CheckoutState::AwaitingProof { .. }) {
            return Err(self.reject("attach payment proof"));
        }

        let outcome = source.pick();
        match &outcome {
            PickOutcome::Picked(image) => self.attach_proof(image.clone())?,
            PickOutcome::Cancelled => log::debug!("checkout: proof picking cancelled"),
            PickOutcome::PermissionDenied => log::warn!("checkout: proof picking not permitted"),
        }
        Ok(outcome)
    }

    pub fn complete_gcash_payment(&mut self) -> Result<&Receipt, CheckoutError> {
        let state = std::mem::replace(&mut self.state, CheckoutState::Idle);
        match state {
            CheckoutState::AwaitingProof {
                receipt,
                proof: Some(_),
            } => {
                log::debug!("checkout: GCash payment for {} confirmed", receipt.order_number);
                self.state = CheckoutState::ReceiptShown { receipt };
            }
            other @ CheckoutState::AwaitingProof { proof: None, .. } => {
                self.state = other;
                log::warn!("checkout: GCash completion without proof rejected");
                return Err(CheckoutError::ProofRequired);
            }
            other => {
                self.state = other;
                return Err(self.reject("confirm a GCash payment"));
            }
        }

        self.pending_receipt()
            .ok_or_else(|| self.reject("confirm a GCash payment"))
    }

    /// Finish the order: clears the cart and hands back the receipt.
    pub fn complete_order(&mut self, cart: &mut Cart) -> Result<Receipt, CheckoutError> {
        let state = std::mem::replace(&mut self.state, CheckoutState::Idle);
        match state {
            CheckoutState::ReceiptShown { receipt } => {
                cart.clear();
                log::debug!("checkout: order {} completed", receipt.order_number);
                Ok(receipt)
            }
            other => {
                self.state = other;
                Err(self.reject("complete the order"))
            }
        }
    }

    /// Step back one screen. Closing a receipt or the GCash step drops the
    /// pending receipt.
    pub fn back(&mut self) {
        self.state = match self.state {
            CheckoutState::AwaitingProof { .. } | CheckoutState::ReceiptShown { .. } => {
                CheckoutState::MethodSelection
            }
            CheckoutState::MethodSelection | CheckoutState::Idle => CheckoutState::Idle,
        };
        log::debug!("checkout: back -> {}", self.state);
    }

    fn next_order_number(&mut self) -> String {
        format!("ORD-{}", self.rng.gen_range(100_000..=999_999))
    }

    fn reject(&self, action: &'static str) -> CheckoutError {
        log::warn!("checkout: cannot {action} while {}", self.state);
        CheckoutError::InvalidTransition {
            action,
            state: self.state.to_string(),
        }
    }
}
