//! Component runtime
//!
//! Re-exports [`radmin_view`]: nodes, scoped contexts, hooks and the render
//! loop.

pub use radmin_view::*;
