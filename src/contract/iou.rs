use super::Contract;
use super::requirements::{require_that, signed_by_exactly, single_iou};
use crate::{Command, CommandData, IouCommand, LedgerTransaction, VerificationFailure};
use ethers::types::Address;
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub const IOU_CONTRACT_ID: &str = "net.corda.training.contract.IOUContract";

/// Rule descriptions, reported verbatim when a rule fails
pub mod rules {
    pub const ISSUE_NO_INPUTS: &str = "No inputs should be consumed when issuing an IOU.";
    pub const ISSUE_ONE_OUTPUT: &str = "Only one output state should be created when issuing an IOU.";
    pub const ISSUE_POSITIVE_AMOUNT: &str = "A newly issued IOU must have a positive amount.";
    pub const ISSUE_DISTINCT_PARTIES: &str = "The lender and borrower cannot have the same identity.";
    pub const ISSUE_SIGNERS: &str =
        "Both lender and borrower together only may sign IOU issue transaction.";

    pub const TRANSFER_ONE_INPUT: &str =
        "An IOU transfer transaction should only consume one input state.";
    pub const TRANSFER_ONE_OUTPUT: &str =
        "An IOU transfer transaction should only create one output state.";
    pub const TRANSFER_ONLY_LENDER_CHANGES: &str = "Only the lender property may change.";
    pub const TRANSFER_LENDER_CHANGES: &str = "The lender property must change in a transfer.";
    pub const TRANSFER_SIGNERS: &str =
        "The borrower, old lender and new lender only must sign an IOU transfer transaction";
}

/// Rules for issuing and transferring IOUs
#[derive(Debug, Clone, Copy, Default)]
pub struct IouContract;

impl IouContract {
    pub fn new() -> Self {
        Self
    }

    fn single_command(tx: &LedgerTransaction) -> Result<(&Command, IouCommand), VerificationFailure> {
        match tx.commands.as_slice() {
            [command] => match command.value {
                CommandData::Iou(kind) => Ok((command, kind)),
                CommandData::Other(_) => Err(VerificationFailure::MalformedTransaction(format!(
                    "Unknown command {}",
                    command
                ))),
            },
            [] => Err(VerificationFailure::MalformedTransaction(
                "Required one IOUContract command, found none".to_string(),
            )),
            commands => {
                let listed: Vec<String> = commands.iter().map(ToString::to_string).collect();
                Err(VerificationFailure::MalformedTransaction(format!(
                    "Required one IOUContract command, found {}: {}",
                    commands.len(),
                    listed.join(", ")
                )))
            }
        }
    }

    fn verify_issue(tx: &LedgerTransaction, signers: &[Address]) -> Result<(), VerificationFailure> {
        require_that(rules::ISSUE_NO_INPUTS, tx.inputs.is_empty())?;
        require_that(rules::ISSUE_ONE_OUTPUT, tx.outputs.len() == 1)?;

        let output = single_iou(tx.outputs_of_iou(), "output")?;
        require_that(rules::ISSUE_POSITIVE_AMOUNT, output.amount.quantity > 0)?;
        require_that(rules::ISSUE_DISTINCT_PARTIES, output.lender != output.borrower)?;

        let participant_keys: Vec<Address> = output
            .participants()
            .iter()
            .map(|party| party.owning_key)
            .collect();
        let distinct_keys: BTreeSet<&Address> = participant_keys.iter().collect();
        require_that(
            rules::ISSUE_SIGNERS,
            distinct_keys.len() == 2 && signed_by_exactly(signers, &participant_keys),
        )
    }

    fn verify_transfer(tx: &LedgerTransaction, signers: &[Address]) -> Result<(), VerificationFailure> {
        require_that(rules::TRANSFER_ONE_INPUT, tx.inputs.len() == 1)?;
        require_that(rules::TRANSFER_ONE_OUTPUT, tx.outputs.len() == 1)?;

        let output = single_iou(tx.outputs_of_iou(), "output")?;
        let input = single_iou(tx.inputs_of_iou(), "input")?;
        require_that(
            rules::TRANSFER_ONLY_LENDER_CHANGES,
            *output == input.with_lender(output.lender.clone()),
        )?;
        require_that(rules::TRANSFER_LENDER_CHANGES, output.lender != input.lender)?;

        let required_keys = [
            input.borrower.owning_key,
            input.lender.owning_key,
            output.lender.owning_key,
        ];
        require_that(rules::TRANSFER_SIGNERS, signed_by_exactly(signers, &required_keys))
    }
}

impl Contract for IouContract {
    fn id(&self) -> &'static str {
        IOU_CONTRACT_ID
    }

    fn verify(&self, tx: &LedgerTransaction) -> Result<(), VerificationFailure> {
        let (command, kind) = Self::single_command(tx).inspect_err(|e| {
            warn!("Rejecting transaction with {} command(s): {}", tx.commands.len(), e);
        })?;
        debug!(
            "Verifying {:?} with {} input(s), {} output(s)",
            kind,
            tx.inputs.len(),
            tx.outputs.len()
        );

        let outcome = match kind {
            IouCommand::Issue => Self::verify_issue(tx, &command.signers),
            IouCommand::Transfer => Self::verify_transfer(tx, &command.signers),
        };

        if let Err(failure) = &outcome {
            warn!("{:?} rejected: {}", kind, failure);
        }
        outcome
    }
}
