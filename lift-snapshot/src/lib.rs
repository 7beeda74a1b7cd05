//! TOML symbol snapshots for asynclift.
//!
//! A snapshot describes a compilation the way the generator sees it: the
//! current module, its referenced modules and the types they declare. The
//! host loads one into a [`SymbolTable`](asynclift_symbols::SymbolTable) and
//! runs the generator over it.
//!
//! ```
//! use asynclift_snapshot::Snapshot;
//! use asynclift_symbols::SymbolQuery;
//!
//! let snapshot: Snapshot = r#"
//! core_library = true
//!
//! [[modules]]
//! name = "App"
//! current = true
//!
//! [[modules.types]]
//! namespace = "Demo"
//! name = "Person"
//! accessibility = "public"
//! "#
//! .parse()
//! .unwrap();
//!
//! let app = snapshot.table.current_module();
//! assert!(snapshot.table.type_in_module(app, "Demo.Person").is_some());
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod load;
pub mod schema;
mod snapshot;
pub mod typeexpr;

pub use error::{Error, Result, SourceContext};
pub use file::SnapshotFile;
pub use snapshot::Snapshot;
