//! Core domain types and logic.

pub mod error;
pub mod feed;
pub mod maturity;
pub mod order;
pub mod settings;
pub mod yield_curve;
