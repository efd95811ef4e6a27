//! Cross-cutting utilities.
//!
//! - [`fs`] - small filesystem helpers (atomic writes, directory creation)
//! - [`progress`] - progress indicators that disable themselves in
//!   non-interactive environments

pub mod fs;
pub mod progress;
