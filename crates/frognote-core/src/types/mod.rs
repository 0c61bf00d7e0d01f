//! Core type definitions used across the FrogNote workspace.

pub mod id;

pub use id::*;
