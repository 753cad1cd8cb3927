//! h5sh - browse a hierarchical data container like a filesystem
//!
//! This crate provides:
//! - Path resolution for `/`-delimited group paths (`..`, `.`, repeated separators)
//! - A listing engine with `*`/`?` wildcards and column-aligned, typed output
//! - Group-name completion for path arguments
//! - A small command shell (`cd`, `ls`, `pwd`, `help`, `quit`) over any
//!   [`h5sh_sdk::StoreProvider`]
//!
//! ```
//! use h5sh::Shell;
//! use h5sh_core::MemoryStore;
//! use std::sync::Arc;
//!
//! let mut store = MemoryStore::new();
//! store.add_group("/runs").unwrap();
//!
//! let mut shell = Shell::new(Arc::new(store), "demo.h5");
//! shell.execute_capture("cd runs").unwrap();
//! assert_eq!(shell.execute_capture("pwd").unwrap(), "/runs\n");
//! ```

pub mod complete;
pub mod error;
pub mod help;
pub mod listing;
pub mod path;
pub mod pattern;
pub mod shell;
pub mod theme;

pub use error::{H5shError, H5shResult};
pub use listing::{Entry, EntryKind};
pub use path::{resolve, Location};
pub use pattern::Pattern;
pub use shell::{CommandFn, SharedStore, Shell, ShellBuilder};
pub use theme::Theme;
