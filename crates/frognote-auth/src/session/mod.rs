//! Session lifecycle.

pub mod registry;

pub use registry::SessionRegistry;
