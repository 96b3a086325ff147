// crates/addressing-core/src/lib.rs

//! International postal address handling: per-country formats, subdivision
//! lookup, locale-aware formatting and postal code validation.
//!
//! ```
//! use addressing_core::{Address, DefaultFormatter, FormatterOptions};
//!
//! let address = Address::new()
//!     .with_country_code("US")
//!     .with_administrative_area("CA")
//!     .with_locality("Mountain View")
//!     .with_postal_code("94043")
//!     .with_address_line1("1098 Alta Ave");
//!
//! let formatter = DefaultFormatter::new(FormatterOptions::new().html(false));
//! assert_eq!(
//!     formatter.format(&address).unwrap(),
//!     "1098 Alta Ave\nMountain View, CA 94043\nUnited States"
//! );
//! ```

pub mod address;
pub mod address_format;
pub mod country;
pub mod customizations;
pub mod dataset;
pub mod enums;
pub mod error;
pub mod field_override;
pub mod formatter;
pub mod loader;
pub mod locale;
pub mod subdivision;
pub mod validate;

// Re-exports
pub use crate::address::Address;
pub use crate::address_format::{AddressFormat, AddressFormatHelper, AddressFormatRepository};
pub use crate::country::{Country, CountryRepository, AVAILABLE_LOCALES};
pub use crate::dataset::Dataset;
pub use crate::enums::{
    AddressField, AdministrativeAreaType, DependentLocalityType, FieldOverride, LocalityType,
    PatternType, PostalCodeType,
};
pub use crate::error::{AddressingError, Result};
pub use crate::field_override::FieldOverrides;
pub use crate::formatter::{
    AttributeValue, DefaultFormatter, FormatterOptions, HtmlAttributes, PostalLabelFormatter,
    PostalLabelOptions,
};
pub use crate::loader::{DefinitionProvider, DirectoryProvider, EmbeddedProvider, StaticProvider};
pub use crate::subdivision::{LazySubdivisions, Subdivision, SubdivisionRepository};
pub use crate::validate::{AddressValidator, PostalCodePatterns, Violation, ViolationKind};
