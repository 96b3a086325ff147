// crates/addressing-core/src/loader/mod.rs

//! # Data Loader
//!
//! Every dataset is consumed through [`DefinitionProvider`]. The registries
//! never touch files themselves; they ask a provider for one resource at a
//! time and cache what they get back.
//!
//! - [`EmbeddedProvider`]: the curated dataset compiled into the crate.
//! - [`DirectoryProvider`]: the same layout read from disk (optionally gzipped).
//! - [`StaticProvider`]: in-memory data, handy for tests and host overrides.

use crate::customizations::{self, SubdivisionCustomization};
use crate::enums::PatternType;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod directory;
mod embedded;
mod memory;

pub use directory::DirectoryProvider;
pub use embedded::EmbeddedProvider;
pub use memory::StaticProvider;

/// Raw address format record as it appears in the dataset.
///
/// Every property is optional here: definitions are merged (dataset,
/// customization patch, generic defaults) before validation happens in
/// [`crate::AddressFormat::new`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressFormatDefinition {
    pub country_code: Option<String>,
    pub locale: Option<String>,
    pub format: Option<String>,
    pub local_format: Option<String>,
    pub required_fields: Option<Vec<String>>,
    pub uppercase_fields: Option<Vec<String>>,
    pub administrative_area_type: Option<String>,
    pub locality_type: Option<String>,
    pub dependent_locality_type: Option<String>,
    pub postal_code_type: Option<String>,
    pub postal_code_pattern: Option<String>,
    pub postal_code_prefix: Option<String>,
    pub subdivision_depth: Option<u8>,
}

impl AddressFormatDefinition {
    /// Overlays `patch` on top of `self`; properties set in the patch win.
    pub fn merge(self, patch: AddressFormatDefinition) -> Self {
        Self {
            country_code: patch.country_code.or(self.country_code),
            locale: patch.locale.or(self.locale),
            format: patch.format.or(self.format),
            local_format: patch.local_format.or(self.local_format),
            required_fields: patch.required_fields.or(self.required_fields),
            uppercase_fields: patch.uppercase_fields.or(self.uppercase_fields),
            administrative_area_type: patch
                .administrative_area_type
                .or(self.administrative_area_type),
            locality_type: patch.locality_type.or(self.locality_type),
            dependent_locality_type: patch
                .dependent_locality_type
                .or(self.dependent_locality_type),
            postal_code_type: patch.postal_code_type.or(self.postal_code_type),
            postal_code_pattern: patch.postal_code_pattern.or(self.postal_code_pattern),
            postal_code_prefix: patch.postal_code_prefix.or(self.postal_code_prefix),
            subdivision_depth: patch.subdivision_depth.or(self.subdivision_depth),
        }
    }
}

/// One subdivision as stored in a group file. Keys left out for brevity
/// (code, name, country, locale) are filled in by the registry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubdivisionRecord {
    pub code: Option<String>,
    pub local_code: Option<String>,
    pub name: Option<String>,
    pub local_name: Option<String>,
    pub iso_code: Option<String>,
    pub postal_code_pattern: Option<String>,
    pub pattern_type: Option<PatternType>,
    pub has_children: bool,
}

impl SubdivisionRecord {
    /// Overlays `patch` on top of `self`.
    pub fn merge(self, patch: SubdivisionRecord) -> Self {
        Self {
            code: patch.code.or(self.code),
            local_code: patch.local_code.or(self.local_code),
            name: patch.name.or(self.name),
            local_name: patch.local_name.or(self.local_name),
            iso_code: patch.iso_code.or(self.iso_code),
            postal_code_pattern: patch.postal_code_pattern.or(self.postal_code_pattern),
            pattern_type: patch.pattern_type.or(self.pattern_type),
            has_children: patch.has_children || self.has_children,
        }
    }
}

/// All subdivisions of one country at one position in the tree.
///
/// `parents` is omitted in the files when it contains just the country code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionGroupDefinition {
    pub country_code: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub parents: Option<Vec<String>>,
    #[serde(default)]
    pub subdivisions: BTreeMap<String, SubdivisionRecord>,
}

/// Source of every dataset the registries consume.
///
/// Implementations must be cheap to call repeatedly for *different* keys;
/// the registries guarantee each key is requested at most once per process
/// (per repository instance).
pub trait DefinitionProvider: Send + Sync {
    /// Base address format definitions keyed by uppercase country code.
    fn address_formats(&self) -> Result<BTreeMap<String, AddressFormatDefinition>>;

    /// Subdivisions for a group key (see [`crate::subdivision::build_group`]).
    /// `Ok(None)` means no data exists for that group.
    fn subdivisions(&self, group: &str) -> Result<Option<SubdivisionGroupDefinition>>;

    /// Country display names for an exact locale.
    fn country_names(&self, locale: &str) -> Result<Option<BTreeMap<String, String>>>;

    /// Locales for which [`DefinitionProvider::country_names`] has data.
    fn country_name_locales(&self) -> Vec<String> {
        crate::country::AVAILABLE_LOCALES
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    /// Library-maintained patch applied on top of the base format.
    fn address_format_customization(&self, country_code: &str) -> Option<AddressFormatDefinition> {
        customizations::address_format(country_code)
    }

    /// Library-maintained additions/patches for a subdivision group.
    fn subdivision_customization(&self, group: &str) -> Option<SubdivisionCustomization> {
        customizations::subdivisions(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_patch_values() {
        let base = AddressFormatDefinition {
            country_code: Some("EE".into()),
            format: Some("%locality".into()),
            required_fields: Some(vec!["locality".into()]),
            ..Default::default()
        };
        let patch = AddressFormatDefinition {
            required_fields: Some(vec!["address_line1".into()]),
            administrative_area_type: Some("county".into()),
            ..Default::default()
        };
        let merged = base.merge(patch);
        assert_eq!(merged.country_code.as_deref(), Some("EE"));
        assert_eq!(merged.format.as_deref(), Some("%locality"));
        assert_eq!(merged.required_fields, Some(vec!["address_line1".to_string()]));
        assert_eq!(merged.administrative_area_type.as_deref(), Some("county"));
    }

    #[test]
    fn group_parses_with_defaults() {
        let group: SubdivisionGroupDefinition = serde_json::from_str(
            r#"{"country_code":"BR","locale":"pt","subdivisions":{"SC":{"name":"Santa Catarina","has_children":true},"Anhumas":{}}}"#,
        )
        .unwrap();
        assert_eq!(group.parents, None);
        assert!(group.subdivisions["SC"].has_children);
        assert_eq!(group.subdivisions["Anhumas"], SubdivisionRecord::default());
    }
}
