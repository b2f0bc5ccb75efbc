//! Conversion between the internal rule tree and the wire format

pub mod path;
pub mod wire;

pub use path::{field_to_internal, field_to_wire, to_internal, to_internal_or_empty, to_wire};
pub use wire::{from_json_str, to_json_string, WireRuleSet};
