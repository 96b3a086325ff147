// crates/addressing-core/src/loader/memory.rs

use super::{AddressFormatDefinition, DefinitionProvider, SubdivisionGroupDefinition};
use crate::customizations::SubdivisionCustomization;
use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory provider.
///
/// Counts every subdivision group request, which makes it easy to assert
/// that lazy loading really is lazy.
#[derive(Debug, Default)]
pub struct StaticProvider {
    formats: BTreeMap<String, AddressFormatDefinition>,
    groups: BTreeMap<String, SubdivisionGroupDefinition>,
    country_names: BTreeMap<String, BTreeMap<String, String>>,
    customizations: bool,
    group_loads: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, country_code: &str, definition: AddressFormatDefinition) -> Self {
        self.formats.insert(country_code.to_string(), definition);
        self
    }

    pub fn with_group(mut self, group: &str, definition: SubdivisionGroupDefinition) -> Self {
        self.groups.insert(group.to_string(), definition);
        self
    }

    pub fn with_country_names<I, K, V>(mut self, locale: &str, names: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.country_names.insert(locale.to_string(), names);
        self
    }

    /// Applies the library's built-in customizations on top of this data.
    /// Off by default so tests see exactly what they put in.
    pub fn with_customizations(mut self) -> Self {
        self.customizations = true;
        self
    }

    /// How many times [`DefinitionProvider::subdivisions`] was called.
    pub fn group_loads(&self) -> usize {
        self.group_loads.load(Ordering::SeqCst)
    }
}

impl DefinitionProvider for StaticProvider {
    fn address_formats(&self) -> Result<BTreeMap<String, AddressFormatDefinition>> {
        Ok(self.formats.clone())
    }

    fn subdivisions(&self, group: &str) -> Result<Option<SubdivisionGroupDefinition>> {
        self.group_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.groups.get(group).cloned())
    }

    fn country_names(&self, locale: &str) -> Result<Option<BTreeMap<String, String>>> {
        Ok(self.country_names.get(locale).cloned())
    }

    fn country_name_locales(&self) -> Vec<String> {
        self.country_names.keys().cloned().collect()
    }

    fn address_format_customization(&self, country_code: &str) -> Option<AddressFormatDefinition> {
        if self.customizations {
            crate::customizations::address_format(country_code)
        } else {
            None
        }
    }

    fn subdivision_customization(&self, group: &str) -> Option<SubdivisionCustomization> {
        if self.customizations {
            crate::customizations::subdivisions(group)
        } else {
            None
        }
    }
}
