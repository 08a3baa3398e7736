//! Field types with mapping semantics of their own

mod choice;
mod lookup;

pub use choice::*;
pub use lookup::*;
