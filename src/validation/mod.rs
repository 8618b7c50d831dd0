//! The cross-referential validation engine for LCA graphs.
//!
//! This module provides the `Validator`, which runs a fixed, ordered list of
//! rules over a fully-typed graph. Each rule reports every violation it can find;
//! the validator stops at the first rule that reports any.

// Publicly export the primary components for use by other modules.
pub use self::error::{Subject, ValidationError, Violation};
pub use self::rules::Rule;
pub use self::validator::Validator;

// --- MODULE DECLARATIONS ---
mod error;
mod validator;
pub mod rules;
