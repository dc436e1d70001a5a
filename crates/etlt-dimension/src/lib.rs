//! Lookup of surrogate keys for natural keys.
//!
//! Both dimension kinds cache every answer of their resolver, including the
//! answer "not valid", so the backing store is asked at most once per key
//! (per date for type-2 reference dimensions).
//!
//! # Example
//!
//! ```ignore
//! use etlt_dimension::{KeyResolver, Type1Dimension};
//!
//! let mut country = Type1Dimension::new(CountryLookup::connect()?);
//! country.preload(known_countries)?;
//! let id = country.get_id(&"NL".to_string(), None)?;
//! ```

#![deny(unsafe_code)]

mod error;
mod reference;
mod regular;

pub use error::{DimensionError, Result};
pub use reference::{ReferenceInterval, ReferenceResolver, Type2ReferenceDimension};
pub use regular::{KeyResolver, Type1Dimension};
