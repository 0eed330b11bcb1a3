//! Contract Verification Module
//!
//! This module holds the rules that decide whether a ledger transaction may
//! issue or transfer an IOU. Verification is a pure function of the
//! transaction: no state is kept between calls.

mod iou;
mod requirements;


pub use iou::{IouContract, IOU_CONTRACT_ID, rules};

use crate::{LedgerTransaction, Verdict, VerificationFailure};

/// A set of rules governing the states of one contract type
pub trait Contract: Send + Sync {
    /// Fully qualified contract name
    fn id(&self) -> &'static str;

    /// Accept the transaction, or reject it with the first rule it breaks
    fn verify(&self, tx: &LedgerTransaction) -> Result<(), VerificationFailure>;

    /// Verify the transaction and wrap the outcome for the runtime
    fn verdict(&self, tx: &LedgerTransaction) -> Verdict {
        Verdict::new(tx.id(), &self.verify(tx))
    }
}
