//! Blockchain interaction for the Nestera API
//!
//! This crate connects the service to the Soroban RPC node serving the
//! Nestera savings contract: contract id parsing, JSON-RPC calls, and the
//! blockchain feature module with its health indicator.

pub mod contract;
pub mod module;
pub mod rpc;

pub use contract::ContractId;
pub use module::*;
pub use rpc::*;
