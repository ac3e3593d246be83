//! Data models for customer store responses and export rows

pub mod common;
pub mod customer;

pub use common::*;
pub use customer::*;
