// crates/addressing-core/src/loader/embedded.rs

use super::{AddressFormatDefinition, DefinitionProvider, SubdivisionGroupDefinition};
use crate::error::Result;
use std::collections::BTreeMap;

// ----------------------------------------------------------------------------
// Compiled-in dataset
// ----------------------------------------------------------------------------

const ADDRESS_FORMATS: &str = include_str!("../../data/address_formats.json");

const SUBDIVISION_GROUPS: &[(&str, &str)] = &[
    ("AD", include_str!("../../data/subdivision/AD.json")),
    ("BR", include_str!("../../data/subdivision/BR.json")),
    ("BR-SC", include_str!("../../data/subdivision/BR-SC.json")),
    ("BR-SP", include_str!("../../data/subdivision/BR-SP.json")),
    ("CA", include_str!("../../data/subdivision/CA.json")),
    ("CL", include_str!("../../data/subdivision/CL.json")),
    (
        "CL-2375064103a9f46e0fb6858080ebec52f8c8c746",
        include_str!("../../data/subdivision/CL-2375064103a9f46e0fb6858080ebec52f8c8c746.json"),
    ),
    ("CN", include_str!("../../data/subdivision/CN.json")),
    (
        "CN-83f0ec9345c8c7ec61b65995563ea9c3657be954",
        include_str!("../../data/subdivision/CN-83f0ec9345c8c7ec61b65995563ea9c3657be954.json"),
    ),
    (
        "CN-094d515b3608fefc6759a36412cee467437417a5",
        include_str!("../../data/subdivision/CN-094d515b3608fefc6759a36412cee467437417a5.json"),
    ),
    (
        "CN--7c83729bec5e4f5547c102d1fbe2e9e304cff91c",
        include_str!("../../data/subdivision/CN--7c83729bec5e4f5547c102d1fbe2e9e304cff91c.json"),
    ),
    ("ES", include_str!("../../data/subdivision/ES.json")),
    ("IE", include_str!("../../data/subdivision/IE.json")),
    ("JP", include_str!("../../data/subdivision/JP.json")),
    ("SV", include_str!("../../data/subdivision/SV.json")),
    ("TW", include_str!("../../data/subdivision/TW.json")),
    (
        "TW-62457c5125b9883ae4ab7fca3f239a06c5810960",
        include_str!("../../data/subdivision/TW-62457c5125b9883ae4ab7fca3f239a06c5810960.json"),
    ),
    ("US", include_str!("../../data/subdivision/US.json")),
];

const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("de", include_str!("../../data/country/de.json")),
    ("en", include_str!("../../data/country/en.json")),
    ("es", include_str!("../../data/country/es.json")),
    ("fr", include_str!("../../data/country/fr.json")),
    ("ja", include_str!("../../data/country/ja.json")),
    ("zh-Hant", include_str!("../../data/country/zh-Hant.json")),
];

/// The curated dataset shipped inside the crate.
///
/// Nothing is parsed until a registry asks for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedProvider;

impl EmbeddedProvider {
    pub fn new() -> Self {
        Self
    }

    /// Group keys present in the compiled-in dataset.
    pub fn subdivision_groups() -> impl Iterator<Item = &'static str> {
        SUBDIVISION_GROUPS.iter().map(|(group, _)| *group)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, json)| *json)
}

impl DefinitionProvider for EmbeddedProvider {
    fn address_formats(&self) -> Result<BTreeMap<String, AddressFormatDefinition>> {
        Ok(serde_json::from_str(ADDRESS_FORMATS)?)
    }

    fn subdivisions(&self, group: &str) -> Result<Option<SubdivisionGroupDefinition>> {
        lookup(SUBDIVISION_GROUPS, group)
            .map(serde_json::from_str)
            .transpose()
            .map_err(Into::into)
    }

    fn country_names(&self, locale: &str) -> Result<Option<BTreeMap<String, String>>> {
        lookup(COUNTRY_NAMES, locale)
            .map(serde_json::from_str)
            .transpose()
            .map_err(Into::into)
    }

    fn country_name_locales(&self) -> Vec<String> {
        COUNTRY_NAMES.iter().map(|(l, _)| l.to_string()).collect()
    }
}
