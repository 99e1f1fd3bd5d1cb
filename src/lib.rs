//! Lectern application library
//!
//! Catalog browsing (search, filters, sorting, pagination) and the simulated
//! reservation flow, packaged as kernel modules.

pub mod modules;
pub mod utils;

/// Re-export commonly used types
pub use modules::*;
