//! Car records
//!
//! This module provides the record type kept in the collection and the
//! partial form used by PATCH requests.

pub mod car;

pub use car::{Car, CarPatch, default_cars};
