// crates/addressing-core/src/address.rs

use crate::enums::AddressField;
use crate::locale::UNDETERMINED;
use serde::{Deserialize, Serialize};

/// A postal address.
///
/// Every field is a string; an absent value is the empty string. The locale
/// defaults to `"und"`. Addresses are immutable: the `with_*` methods return
/// a modified copy.
///
/// ```rust
/// use addressing_core::Address;
///
/// let address = Address::new()
///     .with_country_code("US")
///     .with_administrative_area("CA")
///     .with_locality("Mountain View")
///     .with_postal_code("94043");
///
/// let moved = address.with_postal_code("94044");
/// assert_eq!(address.postal_code(), "94043");
/// assert_eq!(moved.postal_code(), "94044");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    country_code: String,
    administrative_area: String,
    locality: String,
    dependent_locality: String,
    postal_code: String,
    sorting_code: String,
    address_line1: String,
    address_line2: String,
    address_line3: String,
    organization: String,
    given_name: String,
    additional_name: String,
    family_name: String,
    locale: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            country_code: String::new(),
            administrative_area: String::new(),
            locality: String::new(),
            dependent_locality: String::new(),
            postal_code: String::new(),
            sorting_code: String::new(),
            address_line1: String::new(),
            address_line2: String::new(),
            address_line3: String::new(),
            organization: String::new(),
            given_name: String::new(),
            additional_name: String::new(),
            family_name: String::new(),
            locale: UNDETERMINED.to_string(),
        }
    }
}

macro_rules! address_fields {
    ($($field:ident => $with:ident),+ $(,)?) => {
        impl Address {
            $(
                pub fn $field(&self) -> &str {
                    &self.$field
                }

                #[must_use]
                pub fn $with(&self, value: impl Into<String>) -> Self {
                    let mut address = self.clone();
                    address.$field = value.into();
                    address
                }
            )+
        }
    };
}

address_fields! {
    country_code => with_country_code,
    administrative_area => with_administrative_area,
    locality => with_locality,
    dependent_locality => with_dependent_locality,
    postal_code => with_postal_code,
    sorting_code => with_sorting_code,
    address_line1 => with_address_line1,
    address_line2 => with_address_line2,
    address_line3 => with_address_line3,
    organization => with_organization,
    given_name => with_given_name,
    additional_name => with_additional_name,
    family_name => with_family_name,
    locale => with_locale,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a field by its [`AddressField`] name.
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::AdministrativeArea => &self.administrative_area,
            AddressField::Locality => &self.locality,
            AddressField::DependentLocality => &self.dependent_locality,
            AddressField::PostalCode => &self.postal_code,
            AddressField::SortingCode => &self.sorting_code,
            AddressField::AddressLine1 => &self.address_line1,
            AddressField::AddressLine2 => &self.address_line2,
            AddressField::AddressLine3 => &self.address_line3,
            AddressField::Organization => &self.organization,
            AddressField::GivenName => &self.given_name,
            AddressField::AdditionalName => &self.additional_name,
            AddressField::FamilyName => &self.family_name,
        }
    }

    /// Returns a copy with `field` replaced.
    #[must_use]
    pub fn with_field(&self, field: AddressField, value: impl Into<String>) -> Self {
        let mut address = self.clone();
        let slot = match field {
            AddressField::AdministrativeArea => &mut address.administrative_area,
            AddressField::Locality => &mut address.locality,
            AddressField::DependentLocality => &mut address.dependent_locality,
            AddressField::PostalCode => &mut address.postal_code,
            AddressField::SortingCode => &mut address.sorting_code,
            AddressField::AddressLine1 => &mut address.address_line1,
            AddressField::AddressLine2 => &mut address.address_line2,
            AddressField::AddressLine3 => &mut address.address_line3,
            AddressField::Organization => &mut address.organization,
            AddressField::GivenName => &mut address.given_name,
            AddressField::AdditionalName => &mut address.additional_name,
            AddressField::FamilyName => &mut address.family_name,
        };
        *slot = value.into();
        address
    }
}
