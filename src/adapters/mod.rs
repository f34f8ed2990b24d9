/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// persistence, layer content reading and page token sealing.
pub mod outbound;
