//! Typed queries
//!
//! A [`Query`] accumulates selection, filter and row cap over the mapped
//! properties of a record type into a [`QueryRequest`]; the compiler turns
//! the request into OData query text:
//!
//! ```text
//! leads?$select=address1_city&$filter=address1_city eq 'Berlin'&$top=10
//! ```

mod builder;
mod compile;
mod filter;
mod operand;
mod request;

pub use builder::*;
pub use compile::compile;
pub use compile::compile_filter;
pub use compile::compile_literal;
pub use compile::escape_string;
pub use compile::query_string;
pub use filter::*;
pub use operand::*;
pub use request::*;
