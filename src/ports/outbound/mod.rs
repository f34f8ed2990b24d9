/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (datastore, layer processing, token
/// encryption).
pub mod datastore;
pub mod layer_processor;
pub mod page_token_codec;

pub use datastore::{Datastore, DatastoreError, NotificationPage};
pub use layer_processor::{LayerProcessingError, LayerProcessor, LayerRequest};
pub use page_token_codec::{PageTokenCodec, TokenError};
