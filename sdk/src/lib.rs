#![doc = include_str!("../README.md")]

mod error;
mod provider;
mod types;

pub use error::{StoreError, StoreResult};
pub use provider::StoreProvider;
pub use types::{AttributeInfo, DatasetInfo, ElementType, ObjectKind, Shape};
