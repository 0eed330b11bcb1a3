//! Small assertion helpers shared by contract rules.

use crate::{IouState, VerificationFailure};
use ethers::types::Address;

/// Fail with `description` unless `condition` holds
pub(crate) fn require_that(description: &str, condition: bool) -> Result<(), VerificationFailure> {
    if condition {
        Ok(())
    } else {
        Err(VerificationFailure::RuleViolation(description.to_string()))
    }
}

/// True when every key of `required` appears in `keys`
pub(crate) fn contains_all(keys: &[Address], required: &[Address]) -> bool {
    required.iter().all(|key| keys.contains(key))
}

/// Two-way containment: the signers are exactly the required keys, ignoring
/// order and repetition
pub(crate) fn signed_by_exactly(signers: &[Address], required: &[Address]) -> bool {
    contains_all(signers, required) && contains_all(required, signers)
}

/// The one IOU state in `states`, or a malformed-transaction failure naming `role`
pub(crate) fn single_iou<'a>(
    mut states: impl Iterator<Item = &'a IouState>,
    role: &str,
) -> Result<&'a IouState, VerificationFailure> {
    match (states.next(), states.next()) {
        (Some(state), None) => Ok(state),
        _ => Err(VerificationFailure::MalformedTransaction(format!(
            "expected exactly one IOUState {}",
            role
        ))),
    }
}
