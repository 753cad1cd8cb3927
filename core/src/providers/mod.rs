pub mod memstore;

pub use memstore::MemoryStore;
