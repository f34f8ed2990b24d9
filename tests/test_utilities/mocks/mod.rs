/// Mock implementations for testing
mod mock_datastore;
mod mock_layer_processor;

pub use mock_datastore::MockDatastore;
pub use mock_layer_processor::MockLayerProcessor;
