//! # fast-deepclone
//!
//! Deep clone and deep copy of JavaScript-style object graphs.
//!
//! ## Design Principles
//!
//! - **Cycle-safe**: every heap node is cloned at most once per operation, so
//!   circular and shared references keep their topology
//! - **Thread-safe**: values are `Send + Sync` (`Arc` + `parking_lot` locks)
//! - **Two modes**: clone mode duplicates plain objects and arrays and shares
//!   special built-ins; copy mode also duplicates Map, Set, buffers, typed
//!   arrays, DataView, Date and RegExp
//! - **Infallible**: whatever cannot be duplicated is shared by reference
//!
//! ```ignore
//! let copy = fast_deepclone::deep_clone(&value, true);
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod array_buffer;
pub mod binding;
pub mod boxed;
pub mod classify;
pub mod convert;
pub mod data_view;
pub mod date;
pub mod deep_clone;
pub mod error;
pub mod error_object;
pub mod external;
pub mod function;
pub mod map_data;
pub mod object;
pub mod options;
pub mod regexp;
pub mod string;
pub mod symbol;
pub mod typed_array;
pub mod value;
pub mod weak_collection;

pub use classify::{ClonePolicy, ValueClass, classify, policy};
pub use convert::{from_json, to_json};
pub use deep_clone::{CloneStats, DeepCloner, deep_clone, deep_clone_with};
pub use error::{ValueError, ValueResult};
pub use object::{JsObject, PropertyDescriptor, PropertyKey};
pub use options::{CloneMode, CloneOptions};
pub use string::JsString;
pub use value::{HeapRef, Value};
