//! URL handling module for Sitemill
//!
//! This module turns raw hyperlinks into absolute, comparable URLs:
//! resolution against a base context, canonicalization into the dedup key,
//! and www-insensitive host comparison.

mod canonical;
mod domain;
mod resolve;

pub use canonical::canonicalize;
pub use domain::{same_site, strip_www};
pub use resolve::resolve;
