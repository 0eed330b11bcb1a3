//! API Module
//!
//! Exposes contract verification to the ledger runtime over JSON-RPC.

mod server;
pub use server::{router, AppState, Server};
