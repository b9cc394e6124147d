use rust_decimal::Decimal;

use super::{Delivery, DeliveryPayment, DeliveryStatus};
use crate::error::{CafeError, Result};
use crate::order::{PickOutcome, ProofRef, ProofSource};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub ongoing: usize,
    pub completed: usize,
}

/// What the rider sees after handing over an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryCompletion {
    pub id: String,
    pub customer: String,
    pub total: Decimal,
    pub change: Decimal,
    pub proof: Option<ProofRef>,
}

/// The rider's assigned deliveries
#[derive(Debug, Default)]
pub struct DeliveryBoard {
    deliveries: Vec<Delivery>,
}

impl DeliveryBoard {
    pub fn new(deliveries: Vec<Delivery>) -> Self {
        Self { deliveries }
    }

    pub fn into_deliveries(self) -> Vec<Delivery> {
        self.deliveries
    }

    pub fn list(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn get(&self, id: &str) -> Result<&Delivery> {
        self.deliveries
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| CafeError::DeliveryNotFound(id.to_string()))
    }

    pub fn counts(&self) -> StatusCounts {
        self.deliveries
            .iter()
            .fold(StatusCounts::default(), |mut counts, d| {
                match d.status {
                    DeliveryStatus::Pending => counts.pending += 1,
                    DeliveryStatus::Ongoing => counts.ongoing += 1,
                    DeliveryStatus::Completed => counts.completed += 1,
                }
                counts
            })
    }

    /// Change owed for `received` cash; zero when it doesn't cover the total
    pub fn change_for(&self, id: &str, received: Decimal) -> Result<Decimal> {
        let total = self.get(id)?.total();
        Ok(if received >= total {
            received - total
        } else {
            Decimal::ZERO
        })
    }

    /// Mark a delivery as handed over.
    ///
    /// Cash-on-delivery orders need the full amount collected first; GCash
    /// orders are already paid. The proof photo is optional and a cancelled
    /// or refused pick doesn't block completion.
    pub fn complete(
        &mut self,
        id: &str,
        cash_received: Option<Decimal>,
        photo: Option<&mut dyn ProofSource>,
    ) -> Result<DeliveryCompletion> {
        let delivery = self
            .deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| CafeError::DeliveryNotFound(id.to_string()))?;

        if delivery.status == DeliveryStatus::Completed {
            return Err(CafeError::DeliveryAlreadyCompleted(id.to_string()));
        }

        let total = delivery.total();
        let change = match delivery.payment_method {
            DeliveryPayment::Cod => {
                let received = cash_received.unwrap_or(Decimal::ZERO);
                if received < total {
                    log::warn!("delivery {id}: {received} collected, {total} due");
                    return Err(CafeError::InsufficientCash {
                        required: total,
                        received,
                    });
                }
                received - total
            }
            DeliveryPayment::GCash => Decimal::ZERO,
        };

        let proof = match photo.map(|source| source.pick()) {
            Some(PickOutcome::Picked(image)) => Some(image),
            Some(PickOutcome::PermissionDenied) => {
                log::warn!("delivery {id}: camera permission denied, completing without photo");
                None
            }
            Some(PickOutcome::Cancelled) | None => None,
        };

        delivery.status = DeliveryStatus::Completed;
        if delivery.payment_method == DeliveryPayment::Cod {
            delivery.cash_received = cash_received;
        }
        delivery.proof_photo = proof.as_ref().map(|p| p.path().to_path_buf());
        log::debug!("delivery {id}: completed");

        Ok(DeliveryCompletion {
            id: delivery.id.clone(),
            customer: delivery.customer.clone(),
            total,
            change,
            proof,
        })
    }
}
