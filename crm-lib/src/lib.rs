//! Typed records and queries for Dynamics 365 / Dataverse
//!
//! Maps strongly-typed Rust records to the loosely-typed attribute bags of
//! the Web API and back, and builds OData queries over their mapped fields.
//! Transport is left to the caller: this crate produces query paths and
//! attribute bags, and consumes JSON bodies.

pub mod error;
pub mod mapping;
pub mod model;
pub mod option_set;
pub mod query;

mod source;

pub use source::*;
