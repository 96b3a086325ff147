// crates/addressing-core/src/address_format.rs

//! Per-country address formats.
//!
//! A format is built once per uppercase country code and shared as an
//! [`Arc`]. Countries missing from the dataset get the generic format, so
//! [`AddressFormatRepository::get`] only fails on broken data.

use crate::enums::{
    AddressField, AdministrativeAreaType, DependentLocalityType, LocalityType, PostalCodeType,
};
use crate::error::{AddressingError, Result};
use crate::field_override::FieldOverrides;
use crate::loader::{AddressFormatDefinition, DefinitionProvider};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressFormat {
    country_code: String,
    locale: Option<String>,
    format: String,
    local_format: Option<String>,
    required_fields: Vec<AddressField>,
    uppercase_fields: Vec<AddressField>,
    administrative_area_type: Option<AdministrativeAreaType>,
    locality_type: Option<LocalityType>,
    dependent_locality_type: Option<DependentLocalityType>,
    postal_code_type: Option<PostalCodeType>,
    postal_code_pattern: Option<String>,
    postal_code_prefix: Option<String>,
    subdivision_depth: u8,
    used_fields: Vec<AddressField>,
}

fn parse_fields(fields: Option<Vec<String>>) -> Result<Vec<AddressField>> {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(|field| {
            field
                .parse::<AddressField>()
                .map_err(|_| AddressingError::InvalidField(field))
        })
        .collect()
}

/// Parses a `*_type` value, keeping it only when `field` is used.
fn parse_type<T>(
    value: Option<String>,
    field: AddressField,
    used: &[AddressField],
) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = AddressingError>,
{
    match value {
        Some(value) if used.contains(&field) => value.parse().map(Some),
        _ => Ok(None),
    }
}

impl AddressFormat {
    /// Builds a format from an already merged definition.
    ///
    /// No defaults are applied here; see [`AddressFormatRepository`] for the
    /// dataset/customization/generic merge.
    pub fn new(definition: AddressFormatDefinition) -> Result<Self> {
        let country_code = definition
            .country_code
            .ok_or(AddressingError::MissingProperty("country_code"))?;
        let format = definition
            .format
            .ok_or(AddressingError::MissingProperty("format"))?;

        let required_fields = parse_fields(definition.required_fields)?;
        let uppercase_fields = parse_fields(definition.uppercase_fields)?;

        let used_fields: Vec<AddressField> = AddressField::ALL
            .iter()
            .copied()
            .filter(|field| format.contains(&field.placeholder()))
            .collect();

        let administrative_area_type = parse_type(
            definition.administrative_area_type,
            AddressField::AdministrativeArea,
            &used_fields,
        )?;
        let locality_type =
            parse_type(definition.locality_type, AddressField::Locality, &used_fields)?;
        let dependent_locality_type = parse_type(
            definition.dependent_locality_type,
            AddressField::DependentLocality,
            &used_fields,
        )?;
        let postal_code_type =
            parse_type(definition.postal_code_type, AddressField::PostalCode, &used_fields)?;

        let (postal_code_pattern, postal_code_prefix) =
            if used_fields.contains(&AddressField::PostalCode) {
                (definition.postal_code_pattern, definition.postal_code_prefix)
            } else {
                (None, None)
            };

        Ok(Self {
            country_code,
            locale: definition.locale,
            format,
            local_format: definition.local_format,
            required_fields,
            uppercase_fields,
            administrative_area_type,
            locality_type,
            dependent_locality_type,
            postal_code_type,
            postal_code_pattern,
            postal_code_prefix,
            subdivision_depth: definition.subdivision_depth.unwrap_or(0),
            used_fields,
        })
    }

    /// Looks the format up in the process-wide [`Dataset`](crate::Dataset).
    pub fn get(country_code: &str) -> Result<Arc<AddressFormat>> {
        crate::Dataset::global().address_formats().get(country_code)
    }

    /// All formats of the process-wide dataset.
    pub fn all() -> Result<BTreeMap<String, Arc<AddressFormat>>> {
        crate::Dataset::global().address_formats().all()
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Major-to-minor template (without the country line).
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Template used when rendering in the country's own language.
    pub fn local_format(&self) -> Option<&str> {
        self.local_format.as_deref()
    }

    pub fn required_fields(&self) -> &[AddressField] {
        &self.required_fields
    }

    pub fn uppercase_fields(&self) -> &[AddressField] {
        &self.uppercase_fields
    }

    pub fn administrative_area_type(&self) -> Option<AdministrativeAreaType> {
        self.administrative_area_type
    }

    pub fn locality_type(&self) -> Option<LocalityType> {
        self.locality_type
    }

    pub fn dependent_locality_type(&self) -> Option<DependentLocalityType> {
        self.dependent_locality_type
    }

    pub fn postal_code_type(&self) -> Option<PostalCodeType> {
        self.postal_code_type
    }

    pub fn postal_code_pattern(&self) -> Option<&str> {
        self.postal_code_pattern.as_deref()
    }

    pub fn postal_code_prefix(&self) -> Option<&str> {
        self.postal_code_prefix.as_deref()
    }

    pub fn subdivision_depth(&self) -> u8 {
        self.subdivision_depth
    }

    /// Fields whose placeholder appears in [`AddressFormat::format`], in
    /// [`AddressField`] declaration order.
    pub fn used_fields(&self) -> &[AddressField] {
        &self.used_fields
    }

    /// Used subdivision fields, top level first.
    pub fn used_subdivision_fields(&self) -> Vec<AddressField> {
        AddressField::SUBDIVISIONS
            .iter()
            .copied()
            .filter(|field| self.used_fields.contains(field))
            .collect()
    }
}

// ----------------------------------------------------------------------------
// Repository
// ----------------------------------------------------------------------------

fn generic_definition() -> AddressFormatDefinition {
    AddressFormatDefinition {
        format: Some(
            "%given_name %family_name\n%organization\n%address_line1\n%address_line2\n%address_line3\n%locality"
                .into(),
        ),
        required_fields: Some(vec!["address_line1".into(), "locality".into()]),
        uppercase_fields: Some(vec!["locality".into()]),
        administrative_area_type: Some("province".into()),
        locality_type: Some("city".into()),
        dependent_locality_type: Some("suburb".into()),
        postal_code_type: Some("postal".into()),
        subdivision_depth: Some(0),
        ..Default::default()
    }
}

/// Loads and caches address formats from a [`DefinitionProvider`].
pub struct AddressFormatRepository {
    provider: Arc<dyn DefinitionProvider>,
    definitions: OnceCell<BTreeMap<String, AddressFormatDefinition>>,
    formats: Mutex<HashMap<String, Arc<AddressFormat>>>,
}

impl std::fmt::Debug for AddressFormatRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressFormatRepository")
            .field("loaded", &self.definitions.get().is_some())
            .finish_non_exhaustive()
    }
}

impl AddressFormatRepository {
    pub fn new(provider: Arc<dyn DefinitionProvider>) -> Self {
        Self {
            provider,
            definitions: OnceCell::new(),
            formats: Mutex::new(HashMap::new()),
        }
    }

    fn definitions(&self) -> Result<&BTreeMap<String, AddressFormatDefinition>> {
        self.definitions.get_or_try_init(|| {
            debug!("loading address format definitions");
            self.provider.address_formats()
        })
    }

    /// Dataset entry, then library customization, then generic defaults.
    fn process_definition(&self, country_code: &str) -> Result<AddressFormatDefinition> {
        let mut definition = self
            .definitions()?
            .get(country_code)
            .cloned()
            .unwrap_or_default();
        definition.country_code.get_or_insert_with(|| country_code.to_string());

        if let Some(patch) = self.provider.address_format_customization(country_code) {
            definition = definition.merge(patch);
        }

        let mut definition = generic_definition().merge(definition);
        let required = definition.required_fields.get_or_insert_with(Vec::new);
        for name in [AddressField::GivenName, AddressField::FamilyName] {
            if !required.iter().any(|f| f == name.as_str()) {
                required.push(name.as_str().to_string());
            }
        }
        Ok(definition)
    }

    /// Case-insensitive lookup. Each code is built once and then shared.
    pub fn get(&self, country_code: &str) -> Result<Arc<AddressFormat>> {
        let country_code = country_code.to_uppercase();

        if let Some(format) = self.lock().get(&country_code) {
            trace!(country_code = %country_code, "address format cache hit");
            return Ok(Arc::clone(format));
        }

        debug!(country_code = %country_code, "building address format");
        let format = Arc::new(AddressFormat::new(self.process_definition(&country_code)?)?);

        // Another thread may have won the race; keep whichever landed first.
        let mut formats = self.lock();
        let format = formats.entry(country_code).or_insert(format);
        Ok(Arc::clone(format))
    }

    /// Every format of the dataset, keyed by country code.
    pub fn all(&self) -> Result<BTreeMap<String, Arc<AddressFormat>>> {
        let codes: Vec<String> = self.definitions()?.keys().cloned().collect();
        codes
            .into_iter()
            .map(|code| self.get(&code).map(|format| (code, format)))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<AddressFormat>>> {
        self.formats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Applies [`FieldOverrides`] to a format's required fields.
pub struct AddressFormatHelper;

impl AddressFormatHelper {
    /// Base required fields minus optional/hidden overrides, plus required
    /// overrides (no duplicates).
    pub fn required_fields(
        address_format: &AddressFormat,
        field_overrides: &FieldOverrides,
    ) -> Vec<AddressField> {
        let mut required: Vec<AddressField> = address_format
            .required_fields()
            .iter()
            .copied()
            .filter(|field| {
                !field_overrides.optional_fields().contains(field)
                    && !field_overrides.hidden_fields().contains(field)
            })
            .collect();

        for field in field_overrides.required_fields() {
            if !required.contains(field) {
                required.push(*field);
            }
        }
        required
    }
}
