/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (RPC, CLI)
/// use to interact with the application core.
pub mod ancestry_port;
pub mod notification_port;

pub use ancestry_port::AncestryPort;
pub use notification_port::NotificationPort;
