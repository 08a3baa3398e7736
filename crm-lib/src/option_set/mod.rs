//! Option set (enumeration) registry
//!
//! Translates between the integer codes the remote store keeps for picklist
//! attributes and their display labels. The registry is loaded from a
//! `GlobalOptionSetDefinitions` document and can be refreshed at any time;
//! readers always see one complete set of definitions.

mod config;
mod registry;
mod sets;

pub use config::*;
pub use registry::*;
pub use sets::*;
