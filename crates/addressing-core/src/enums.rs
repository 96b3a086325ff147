// crates/addressing-core/src/enums.rs

//! Closed sets of string constants.
//!
//! Every set is a plain Rust enum generated by [`value_set!`]. The string
//! value of a variant is what appears in datasets and on the wire; the key is
//! the constant name (`ZIP` for `"zip"`), kept for reverse lookups.

use crate::error::{AddressingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! value_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident : $key:ident => $value:literal),+ $(,)?
        }
        $(default = $default:ident;)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// All `(key, value)` pairs in declaration order.
            pub fn all() -> Vec<(&'static str, &'static str)> {
                vec![$((stringify!($key), $value)),+]
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Gets the key of the provided value.
            pub fn key(value: &str) -> Option<&'static str> {
                match value {
                    $($value => Some(stringify!($key)),)+
                    _ => None,
                }
            }

            pub fn exists(value: &str) -> bool {
                Self::key(value).is_some()
            }

            /// Parses `value`, failing with [`AddressingError::InvalidEnumValue`].
            pub fn assert_exists(value: &str) -> Result<Self> {
                value.parse()
            }

            pub fn assert_all_exist<I, S>(values: I) -> Result<Vec<Self>>
            where
                I: IntoIterator<Item = S>,
                S: AsRef<str>,
            {
                values
                    .into_iter()
                    .map(|v| Self::assert_exists(v.as_ref()))
                    .collect()
            }
        }

        impl FromStr for $name {
            type Err = AddressingError;

            fn from_str(value: &str) -> Result<Self> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(AddressingError::InvalidEnumValue {
                        kind: stringify!($name),
                        value: value.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        $(
            impl Default for $name {
                fn default() -> Self {
                    $name::$default
                }
            }
        )?
    };
}

value_set! {
    /// Address fields. The values match the [`crate::Address`] property names.
    pub enum AddressField {
        AdministrativeArea: ADMINISTRATIVE_AREA => "administrative_area",
        Locality: LOCALITY => "locality",
        DependentLocality: DEPENDENT_LOCALITY => "dependent_locality",
        PostalCode: POSTAL_CODE => "postal_code",
        SortingCode: SORTING_CODE => "sorting_code",
        AddressLine1: ADDRESS_LINE1 => "address_line1",
        AddressLine2: ADDRESS_LINE2 => "address_line2",
        AddressLine3: ADDRESS_LINE3 => "address_line3",
        Organization: ORGANIZATION => "organization",
        GivenName: GIVEN_NAME => "given_name",
        AdditionalName: ADDITIONAL_NAME => "additional_name",
        FamilyName: FAMILY_NAME => "family_name",
    }
}

impl AddressField {
    /// Subdivision fields, top level first.
    pub const SUBDIVISIONS: [AddressField; 3] = [
        AddressField::AdministrativeArea,
        AddressField::Locality,
        AddressField::DependentLocality,
    ];

    /// The `%placeholder` token used in format strings.
    pub fn placeholder(self) -> String {
        format!("%{}", self.as_str())
    }

    /// CSS class used by the HTML renderer, e.g. `address-line1`.
    pub fn css_class(self) -> String {
        self.as_str().replace('_', "-")
    }
}

value_set! {
    pub enum AdministrativeAreaType {
        Area: AREA => "area",
        Canton: CANTON => "canton",
        County: COUNTY => "county",
        Department: DEPARTMENT => "department",
        District: DISTRICT => "district",
        DoSi: DO_SI => "do_si",
        Emirate: EMIRATE => "emirate",
        Island: ISLAND => "island",
        Oblast: OBLAST => "oblast",
        Parish: PARISH => "parish",
        Prefecture: PREFECTURE => "prefecture",
        Province: PROVINCE => "province",
        Region: REGION => "region",
        State: STATE => "state",
    }
    default = Province;
}

value_set! {
    pub enum LocalityType {
        City: CITY => "city",
        District: DISTRICT => "district",
        PostTown: POST_TOWN => "post_town",
        Suburb: SUBURB => "suburb",
    }
    default = City;
}

value_set! {
    pub enum DependentLocalityType {
        District: DISTRICT => "district",
        Neighborhood: NEIGHBORHOOD => "neighborhood",
        VillageTownship: VILLAGE_TOWNSHIP => "village_township",
        Suburb: SUBURB => "suburb",
        Townland: TOWNLAND => "townland",
    }
    default = Suburb;
}

value_set! {
    pub enum PostalCodeType {
        Eir: EIR => "eircode",
        Pin: PIN => "pin",
        Postal: POSTAL => "postal",
        Zip: ZIP => "zip",
    }
    default = Postal;
}

value_set! {
    /// Whether a postal code pattern must match the entire value or only
    /// its beginning.
    pub enum PatternType {
        Full: FULL => "full",
        Start: START => "start",
    }
    // Most subdivisions define only partial patterns.
    default = Start;
}

value_set! {
    pub enum FieldOverride {
        Hidden: HIDDEN => "hidden",
        Optional: OPTIONAL => "optional",
        Required: REQUIRED => "required",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_pairs_in_declaration_order() {
        assert_eq!(
            PostalCodeType::all(),
            vec![
                ("EIR", "eircode"),
                ("PIN", "pin"),
                ("POSTAL", "postal"),
                ("ZIP", "zip")
            ]
        );
    }

    #[test]
    fn key_and_exists() {
        assert_eq!(PostalCodeType::key("zip"), Some("ZIP"));
        assert_eq!(PostalCodeType::key("invalid"), None);
        assert!(PostalCodeType::exists("zip"));
        assert!(!PostalCodeType::exists("invalid"));
    }

    #[test]
    fn assert_exists_rejects_unknown_values() {
        assert_eq!(PostalCodeType::assert_exists("zip").unwrap(), PostalCodeType::Zip);
        let err = PostalCodeType::assert_exists("invalid").unwrap_err();
        assert!(matches!(
            err,
            AddressingError::InvalidEnumValue { kind: "PostalCodeType", .. }
        ));
        assert!(PostalCodeType::assert_all_exist(["zip", "invalid"]).is_err());
        assert_eq!(
            PostalCodeType::assert_all_exist(["zip", "pin"]).unwrap(),
            vec![PostalCodeType::Zip, PostalCodeType::Pin]
        );
    }

    #[test]
    fn defaults() {
        assert_eq!(AdministrativeAreaType::default(), AdministrativeAreaType::Province);
        assert_eq!(LocalityType::default(), LocalityType::City);
        assert_eq!(DependentLocalityType::default(), DependentLocalityType::Suburb);
        assert_eq!(PostalCodeType::default(), PostalCodeType::Postal);
        assert_eq!(PatternType::default(), PatternType::Start);
    }

    #[test]
    fn serde_uses_string_values() {
        let json = serde_json::to_string(&AddressField::AddressLine1).unwrap();
        assert_eq!(json, "\"address_line1\"");
        let field: AddressField = serde_json::from_str("\"given_name\"").unwrap();
        assert_eq!(field, AddressField::GivenName);
        assert!(serde_json::from_str::<AddressField>("\"country\"").is_err());
    }

    #[test]
    fn css_class_and_placeholder() {
        assert_eq!(AddressField::AddressLine1.css_class(), "address-line1");
        assert_eq!(AddressField::PostalCode.placeholder(), "%postal_code");
    }
}
