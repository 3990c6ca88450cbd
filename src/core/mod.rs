//! Core types and constants for the GPS simulator

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
