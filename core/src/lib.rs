#![allow(missing_docs)]

pub mod providers;
pub mod snapshot;

pub use h5sh_sdk;
pub use providers::MemoryStore;
pub use snapshot::{AttributeSpec, NodeSpec, Snapshot};
