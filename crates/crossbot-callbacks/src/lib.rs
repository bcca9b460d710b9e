//! Deferred button callbacks: the shared registry and the code that runs a
//! resolved callback according to its action.

pub mod registry;
pub mod resolve;

pub use registry::CallbackRegistry;
pub use resolve::{parse_fields, resolve, run, Disposition};
