mod in_memory_datastore;

pub use in_memory_datastore::InMemoryDatastore;
