/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod crypto;
pub mod filesystem;
pub mod persistence;
