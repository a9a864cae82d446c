//! Core types and trait definitions for the roster record store.
//!
//! This crate is deliberately free of database and CLI dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod country;
pub mod person;
pub mod query;
pub mod store;
pub mod validate;

pub use validate::{Validate, ValidationError};
