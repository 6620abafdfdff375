//! Schema declarations and resource state
//!
//! The contract between the host runtime and this provider: each resource
//! and data source declares a flat attribute schema ([`attribute`]), and
//! every lifecycle operation works on a flat attribute state ([`state`]).

pub mod attribute;
pub mod state;

pub use attribute::{AttrType, Attribute, Schema};
