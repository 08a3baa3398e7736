//! Descriptor documents consumed from the metadata endpoint

mod option_set;

pub use option_set::*;
