pub mod clock;
pub mod config;
pub mod eip1193;
pub mod stores;
pub mod tx_log;

pub use clock::now_ms;
pub use config::{ConfigError, RuntimeProfile, ShellConfig};
pub use eip1193::Eip1193Adapter;
pub use stores::{ShellStores, Store};
pub use tx_log::{TransactionLogAdapter, TransactionLogEntry, TransactionLogKind};
