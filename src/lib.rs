//! Contract verification for IOU obligations on a UTXO-style ledger.
//!
//! The `contract` module decides whether a resolved ledger transaction may
//! issue or transfer an IOU; the remaining modules carry the data model and
//! the JSON-RPC surface the ledger runtime calls into.

pub mod types; // Parties, amounts, states, commands and ledger transactions.
pub mod contract; // The IOU contract rules.
pub mod api; // JSON-RPC verification endpoint.
pub mod config; // Loads service configuration.

pub use types::*;
pub use config::Config;
pub use contract::{Contract, IouContract, IOU_CONTRACT_ID};
