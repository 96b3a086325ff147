// crates/addressing-core/src/customizations.rs

//! Corrections layered on top of the upstream dataset.
//!
//! Known upstream defects are fixed here instead of forking the data files.
//! Providers consult these tables through
//! [`DefinitionProvider`](crate::loader::DefinitionProvider); the default
//! trait methods return them unchanged.

use crate::loader::{AddressFormatDefinition, SubdivisionRecord};
use std::collections::BTreeMap;

/// Additions and patches for one subdivision group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubdivisionCustomization {
    /// Ids appended to the group (in order) when the dataset lacks them.
    pub add: Vec<String>,
    /// Per-id overrides merged onto the loaded (or added) records.
    pub patches: BTreeMap<String, SubdivisionRecord>,
}

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
}

/// Format patch for a country, if the library maintains one.
pub fn address_format(country_code: &str) -> Option<AddressFormatDefinition> {
    let patch = match country_code {
        // libaddressinput#207
        "BH" => AddressFormatDefinition {
            postal_code_pattern: Some(r"(?:^|\b)(?:1[0-2]|[1-9])\d{2}(?:$|\b)".into()),
            ..Default::default()
        },
        "CO" => AddressFormatDefinition {
            required_fields: strings(&["address_line1", "locality", "administrative_area"]),
            ..Default::default()
        },
        // Organization goes above the recipient (libaddressinput#83).
        "DE" => AddressFormatDefinition {
            format: Some(
                "%organization\n%given_name %family_name\n%address_line1\n%address_line2\n%postal_code %locality".into(),
            ),
            ..Default::default()
        },
        // Sorting code was dropped upstream (libaddressinput#177).
        "FR" => AddressFormatDefinition {
            format: Some(
                "%organization\n%given_name %family_name\n%address_line1\n%address_line2\n%postal_code %locality %sorting_code".into(),
            ),
            ..Default::default()
        },
        // libaddressinput#64
        "EE" => AddressFormatDefinition {
            format: Some(
                "%given_name %family_name\n%organization\n%address_line1\n%address_line2\n%postal_code %locality %administrative_area".into(),
            ),
            required_fields: strings(&["address_line1", "locality", "postal_code"]),
            administrative_area_type: Some("county".into()),
            ..Default::default()
        },
        "LT" => AddressFormatDefinition {
            format: Some(
                "%organization\n%given_name %family_name\n%address_line1\n%address_line2\n%postal_code %locality %administrative_area".into(),
            ),
            required_fields: strings(&["address_line1", "locality", "postal_code"]),
            administrative_area_type: Some("county".into()),
            ..Default::default()
        },
        "LV" => AddressFormatDefinition {
            required_fields: strings(&["address_line1", "locality", "postal_code"]),
            ..Default::default()
        },
        // Locality was dropped upstream (libaddressinput#177).
        "JP" => AddressFormatDefinition {
            format: Some(
                "%family_name %given_name\n%organization\n%address_line1\n%address_line2\n%locality, %administrative_area\n%postal_code".into(),
            ),
            local_format: Some(
                "〒%postal_code\n%administrative_area%locality\n%address_line1\n%address_line2\n%organization\n%family_name %given_name".into(),
            ),
            ..Default::default()
        },
        _ => return None,
    };
    Some(patch)
}

// Colombian departments are missing upstream (libaddressinput#135).
const CO_DEPARTMENTS: &[(&str, &str, &str)] = &[
    ("DC", "Distrito Capital de Bogotá", "11"),
    ("AMA", "Amazonas", "91"),
    ("ANT", "Antioquia", "05"),
    ("ARA", "Arauca", "81"),
    ("ATL", "Atlántico", "08"),
    ("BOL", "Bolívar", "13"),
    ("BOY", "Boyacá", "15"),
    ("CAL", "Caldas", "17"),
    ("CAQ", "Caquetá", "18"),
    ("CAS", "Casanare", "85"),
    ("CAU", "Cauca", "19"),
    ("CES", "Cesar", "20"),
    ("COR", "Córdoba", "23"),
    ("CUN", "Cundinamarca", "25"),
    ("CHO", "Chocó", "27"),
    ("GUA", "Guainía", "94"),
    ("GUV", "Guaviare", "95"),
    ("HUI", "Huila", "41"),
    ("LAG", "La Guajira", "44"),
    ("MAG", "Magdalena", "47"),
    ("MET", "Meta", "50"),
    ("NAR", "Nariño", "52"),
    ("NSA", "Norte de Santander", "54"),
    ("PUT", "Putumayo", "86"),
    ("QUI", "Quindío", "63"),
    ("RIS", "Risaralda", "66"),
    ("SAP", "San Andrés, Providencia y Santa Catalina", "88"),
    ("SAN", "Santander", "68"),
    ("SUC", "Sucre", "70"),
    ("TOL", "Tolima", "73"),
    ("VAC", "Valle del Cauca", "76"),
    ("VAU", "Vaupés", "97"),
    ("VID", "Vichada", "99"),
];

/// Subdivision additions/patches for a group key.
pub fn subdivisions(group: &str) -> Option<SubdivisionCustomization> {
    match group {
        "CO" => {
            let add = CO_DEPARTMENTS.iter().map(|(id, _, _)| id.to_string()).collect();
            let patches = CO_DEPARTMENTS
                .iter()
                .map(|(id, name, prefix)| {
                    let record = SubdivisionRecord {
                        name: Some(name.to_string()),
                        iso_code: Some(format!("CO-{id}")),
                        postal_code_pattern: Some(format!(r"{prefix}\d{{4}}")),
                        ..Default::default()
                    };
                    (id.to_string(), record)
                })
                .collect();
            Some(SubdivisionCustomization { add, patches })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_countries_have_no_patch() {
        assert!(address_format("US").is_none());
        assert!(subdivisions("US").is_none());
    }

    #[test]
    fn japan_gets_both_formats() {
        let jp = address_format("JP").unwrap();
        assert!(jp.format.unwrap().contains("%locality"));
        assert!(jp.local_format.unwrap().starts_with('〒'));
    }

    #[test]
    fn colombia_departments_carry_patterns() {
        let co = subdivisions("CO").unwrap();
        assert_eq!(co.add.len(), 33);
        assert_eq!(co.add[0], "DC");
        let dc = &co.patches["DC"];
        assert_eq!(dc.iso_code.as_deref(), Some("CO-DC"));
        assert_eq!(dc.postal_code_pattern.as_deref(), Some(r"11\d{4}"));
    }
}
