//! Admin layer
//!
//! Re-exports [`radmin_admin`].
//!
//! ## Example
//!
//! ```rust
//! use radmin::admin::{AdminSettings, PathKind, create_path};
//!
//! let settings = AdminSettings::default().with_basename("/admin");
//! let basename = settings.basename.as_deref().unwrap_or_default();
//!
//! assert_eq!(create_path(basename, "posts", PathKind::Edit, Some("7")), "/admin/posts/7");
//! ```

pub use radmin_admin::*;
