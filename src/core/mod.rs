//! Core types and error handling for Blocksmith.
//!
//! This module provides the foundational types used across the crate:
//!
//! - [`error`] - strongly-typed errors and user-friendly error reporting
//! - [`resource`] - the block/template resource model and directory contract

pub mod error;
pub mod resource;

pub use error::{BlocksmithError, ErrorContext, user_friendly_error};
pub use resource::ResourceType;
