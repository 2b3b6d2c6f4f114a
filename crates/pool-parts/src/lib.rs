//! Turn vendor part listings into pool part definitions.
//!
//! Listings arrive as loosely typed JSON from a parts-search API. This crate
//! normalizes their keys, parses SI-prefixed attribute strings into exact
//! decimals and maps each record onto a [`PartDefinition`] that inherits from
//! a package-specific base part.

pub mod class;
pub mod error;
pub mod generate;
pub mod listing;
pub mod part;
pub mod table;
pub mod units;

pub use class::{ComponentClass, UnknownClass};
pub use error::UnsupportedListing;
pub use generate::{PartContext, generate};
pub use listing::{Attributes, Listing, normalize_keys};
pub use part::{CapacitorParams, Editable, Parametric, PartDefinition, ResistorParams};
pub use table::BaseTable;
pub use units::{format_si, parse_si};
