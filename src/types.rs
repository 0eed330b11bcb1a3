use ethers::types::{Address, H256};
use ethers::utils::keccak256;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A ledger identity, known by the key it signs with
///
/// Two parties are the same party when their owning keys match; the name is
/// only a label for humans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub owning_key: Address,
}

impl Party {
    pub fn new(name: impl Into<String>, owning_key: Address) -> Self {
        Self {
            name: name.into(),
            owning_key,
        }
    }
}

impl PartialEq for Party {
    fn eq(&self, other: &Self) -> bool {
        self.owning_key == other.owning_key
    }
}

impl Eq for Party {}

impl Hash for Party {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owning_key.hash(state);
    }
}

/// Size of an obligation, tagged with its currency
///
/// The quantity is signed on purpose: issuing a zero or negative amount is a
/// rule the contract rejects, so it has to be representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub quantity: i64,
    pub token: String,
}

impl Amount {
    pub fn new(quantity: i64, token: impl Into<String>) -> Self {
        Self {
            quantity,
            token: token.into(),
        }
    }
}

/// An IOU obligation: `borrower` owes `amount` to `lender`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IouState {
    pub amount: Amount,
    pub lender: Party,
    pub borrower: Party,
}

impl IouState {
    pub fn new(amount: Amount, lender: Party, borrower: Party) -> Self {
        Self {
            amount,
            lender,
            borrower,
        }
    }

    /// Parties that must be involved in any change to this state
    pub fn participants(&self) -> [&Party; 2] {
        [&self.lender, &self.borrower]
    }

    /// Copy of this state with a different lender and every other field unchanged
    pub fn with_lender(&self, lender: Party) -> Self {
        Self {
            lender,
            ..self.clone()
        }
    }
}

/// Payload of a ledger state
///
/// States owned by other contracts can ride along in the same transaction;
/// they are carried opaquely under their type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ContractState {
    Iou(IouState),
    Other {
        type_name: String,
        body: serde_json::Value,
    },
}

impl ContractState {
    pub fn as_iou(&self) -> Option<&IouState> {
        match self {
            ContractState::Iou(state) => Some(state),
            ContractState::Other { .. } => None,
        }
    }
}

impl From<IouState> for ContractState {
    fn from(state: IouState) -> Self {
        ContractState::Iou(state)
    }
}

/// Commands understood by the IOU contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IouCommand {
    Issue,
    Transfer,
}

/// Declared intent of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandData {
    Iou(IouCommand),
    /// A command belonging to some other contract, by name
    Other(String),
}

impl std::fmt::Display for CommandData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandData::Iou(cmd) => write!(f, "IOUContract.Commands.{:?}", cmd),
            CommandData::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A command together with the keys that signed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub value: CommandData,
    pub signers: Vec<Address>,
}

impl Command {
    pub fn new(value: CommandData, signers: Vec<Address>) -> Self {
        Self { value, signers }
    }

    pub fn iou(command: IouCommand, signers: Vec<Address>) -> Self {
        Self::new(CommandData::Iou(command), signers)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} signed by {:?}", self.value, self.signers)
    }
}

/// Resolved transaction handed over by the ledger runtime for verification
///
/// Inputs are the states being consumed, outputs the states being created.
/// The verifier only ever reads it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub inputs: Vec<ContractState>,
    pub outputs: Vec<ContractState>,
    pub commands: Vec<Command>,
}

impl LedgerTransaction {
    /// Digest of the transaction used to tag logs and verdicts
    pub fn id(&self) -> H256 {
        // Plain data with string keys always serializes.
        let data = serde_json::to_vec(self).unwrap_or_default();
        H256::from_slice(&keccak256(data))
    }

    pub fn inputs_of_iou(&self) -> impl Iterator<Item = &IouState> {
        self.inputs.iter().filter_map(ContractState::as_iou)
    }

    pub fn outputs_of_iou(&self) -> impl Iterator<Item = &IouState> {
        self.outputs.iter().filter_map(ContractState::as_iou)
    }
}

/// Reasons a transaction is refused by a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum VerificationFailure {
    /// The transaction is not shaped the way the contract can reason about
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),
    /// A named contract rule does not hold; carries the rule's description
    #[error("{0}")]
    RuleViolation(String),
}

/// Outcome of verification returned to the ledger runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub tx_id: H256,
    pub status: VerdictStatus,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictStatus {
    Accepted,
    Rejected { reason: String },
}

impl Verdict {
    pub fn new(tx_id: H256, outcome: &Result<(), VerificationFailure>) -> Self {
        let status = match outcome {
            Ok(()) => VerdictStatus::Accepted,
            Err(failure) => VerdictStatus::Rejected {
                reason: failure.to_string(),
            },
        };
        Self {
            tx_id,
            status,
            timestamp: chrono::Utc::now().timestamp() as u64,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == VerdictStatus::Accepted
    }
}
