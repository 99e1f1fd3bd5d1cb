//! Kernel for Lectern: layered settings plus the module lifecycle contract.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
