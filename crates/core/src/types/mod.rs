//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod property;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Cents, MoneyError, format_amount};
pub use property::PropertyValues;
