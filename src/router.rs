//! Router abstraction
//!
//! Re-exports [`radmin_router`].
//!
//! ## Architecture
//!
//! - **matcher**: `match_path`, segment-based and linear in the path length
//! - **history**: memory and hash session history with blocking
//! - **engine**: the built-in host router
//! - **routes**: `routes`, `route` and `outlet`, matched at render time
//! - **provider**: the `RouterProvider` trait bundling the whole surface

pub use radmin_router::*;
