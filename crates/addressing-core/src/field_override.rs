// crates/addressing-core/src/field_override.rs

use crate::enums::{AddressField, FieldOverride};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Per-context overrides grouped by kind.
///
/// Each field lands in exactly one of the three lists; when a field is given
/// twice the last override wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "std::collections::BTreeMap<String, String>")]
pub struct FieldOverrides {
    hidden_fields: Vec<AddressField>,
    optional_fields: Vec<AddressField>,
    required_fields: Vec<AddressField>,
}

impl FieldOverrides {
    pub fn new<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (AddressField, FieldOverride)>,
    {
        let mut grouped = Self::default();
        for (field, kind) in overrides {
            grouped.remove(field);
            match kind {
                FieldOverride::Hidden => grouped.hidden_fields.push(field),
                FieldOverride::Optional => grouped.optional_fields.push(field),
                FieldOverride::Required => grouped.required_fields.push(field),
            }
        }
        grouped
    }

    /// Builds overrides from raw `field => kind` strings, validating both.
    pub fn from_definition<I, K, V>(definition: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs = definition
            .into_iter()
            .map(|(field, kind)| {
                let field = AddressField::assert_exists(field.as_ref())?;
                let kind = FieldOverride::assert_exists(kind.as_ref())?;
                Ok((field, kind))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(pairs))
    }

    fn remove(&mut self, field: AddressField) {
        self.hidden_fields.retain(|f| *f != field);
        self.optional_fields.retain(|f| *f != field);
        self.required_fields.retain(|f| *f != field);
    }

    pub fn hidden_fields(&self) -> &[AddressField] {
        &self.hidden_fields
    }

    pub fn optional_fields(&self) -> &[AddressField] {
        &self.optional_fields
    }

    pub fn required_fields(&self) -> &[AddressField] {
        &self.required_fields
    }

    pub fn is_hidden(&self, field: AddressField) -> bool {
        self.hidden_fields.contains(&field)
    }
}

impl TryFrom<std::collections::BTreeMap<String, String>> for FieldOverrides {
    type Error = crate::AddressingError;

    fn try_from(map: std::collections::BTreeMap<String, String>) -> Result<Self> {
        Self::from_definition(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AddressingError;

    #[test]
    fn groups_by_kind() {
        let overrides = FieldOverrides::new([
            (AddressField::GivenName, FieldOverride::Hidden),
            (AddressField::PostalCode, FieldOverride::Optional),
            (AddressField::AdditionalName, FieldOverride::Hidden),
            (AddressField::Organization, FieldOverride::Required),
        ]);
        assert_eq!(
            overrides.hidden_fields(),
            &[AddressField::GivenName, AddressField::AdditionalName]
        );
        assert_eq!(overrides.optional_fields(), &[AddressField::PostalCode]);
        assert_eq!(overrides.required_fields(), &[AddressField::Organization]);
    }

    #[test]
    fn last_override_wins() {
        let overrides = FieldOverrides::new([
            (AddressField::Locality, FieldOverride::Hidden),
            (AddressField::Locality, FieldOverride::Required),
        ]);
        assert!(overrides.hidden_fields().is_empty());
        assert_eq!(overrides.required_fields(), &[AddressField::Locality]);
    }

    #[test]
    fn raw_definitions_are_validated() {
        let err = FieldOverrides::from_definition([("INVALID", "hidden")]).unwrap_err();
        assert!(matches!(err, AddressingError::InvalidEnumValue { kind: "AddressField", .. }));

        let err = FieldOverrides::from_definition([("given_name", "INVALID")]).unwrap_err();
        assert!(matches!(err, AddressingError::InvalidEnumValue { kind: "FieldOverride", .. }));

        let ok = FieldOverrides::from_definition([("given_name", "optional")]).unwrap();
        assert_eq!(ok.optional_fields(), &[AddressField::GivenName]);
    }

    #[test]
    fn deserializes_from_a_json_map() {
        let overrides: FieldOverrides =
            serde_json::from_str(r#"{"organization":"hidden","postal_code":"required"}"#).unwrap();
        assert!(overrides.is_hidden(AddressField::Organization));
        assert_eq!(overrides.required_fields(), &[AddressField::PostalCode]);

        assert!(serde_json::from_str::<FieldOverrides>(r#"{"nope":"hidden"}"#).is_err());
    }
}
