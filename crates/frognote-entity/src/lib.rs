//! # frognote-entity
//!
//! Domain entity models for FrogNote. Constructors validate field lengths
//! so that a value of these types always fits the relational schema.

pub mod backup;
pub mod user;
