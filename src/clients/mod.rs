// External ledger clients

pub mod ledger_rpc;

// Re-export client types
pub use ledger_rpc::LedgerRpcClient;
