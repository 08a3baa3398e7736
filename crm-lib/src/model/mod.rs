//! Typed models

mod attributes;
mod descriptor;
mod entity;
mod field;
pub mod metadata;
mod record;
mod schema;
pub mod types;
mod value;

pub use attributes::*;
pub use descriptor::*;
pub use entity::*;
pub use field::*;
pub use record::*;
pub use schema::*;
pub use types::*;
pub use value::*;
