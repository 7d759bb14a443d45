//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod search;
pub mod token;

pub use search::*;
pub use token::*;
