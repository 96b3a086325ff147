//! addressing-cli
//! ==============
//!
//! Command-line interface for the `addressing-core` postal address library.
//!
//! The binary (`addressing`) is the primary deliverable. This library target
//! carries the overview for docs.rs plus the small argument parsers the
//! binary shares with its tests.
//!
//! Basic usage:
//!
//! ```text
//! addressing --help
//! addressing format -c US -f address_line1="1098 Alta Ave" -f locality="Mountain View" \
//!     -f administrative_area=CA -f postal_code=94043
//! addressing format -c US -f locality="Mt View" --postal-label FR --locale fr
//! addressing validate -c US -f postal_code=909 -o given_name=optional
//! addressing subdivisions BR SC
//! addressing format-info JP
//! ```
//!
//! For programmatic access use the `addressing-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

use addressing_core::{
    Address, AddressField, Dataset, DefaultFormatter, FieldOverride, FieldOverrides,
    FormatterOptions, PostalLabelFormatter, PostalLabelOptions,
};
use anyhow::{anyhow, Context};
use serde_json::Value;
use std::path::Path;

/// Splits `name=value`.
pub fn split_pair(raw: &str) -> anyhow::Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got `{raw}`"))
}

/// Builds an address from `name=value` pairs.
pub fn build_address(
    country_code: &str,
    fields: &[String],
    locale: Option<&str>,
) -> anyhow::Result<Address> {
    let mut address = Address::new().with_country_code(country_code);
    if let Some(locale) = locale {
        address = address.with_locale(locale);
    }
    for raw in fields {
        let (name, value) = split_pair(raw)?;
        let field: AddressField = name
            .parse()
            .with_context(|| format!("unknown address field in `{raw}`"))?;
        address = address.with_field(field, value);
    }
    Ok(address)
}

/// Parses `name=hidden|optional|required` pairs.
pub fn build_overrides(raw: &[String]) -> anyhow::Result<FieldOverrides> {
    let mut overrides = Vec::with_capacity(raw.len());
    for pair in raw {
        let (name, value) = split_pair(pair)?;
        let field: AddressField = name
            .parse()
            .with_context(|| format!("unknown address field in `{pair}`"))?;
        let kind: FieldOverride = value
            .trim()
            .parse()
            .with_context(|| format!("unknown override in `{pair}`"))?;
        overrides.push((field, kind));
    }
    Ok(FieldOverrides::new(overrides))
}

/// Reads a JSON options file.
pub fn read_options(path: &Path) -> anyhow::Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading options from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// What `addressing format` was asked to do.
///
/// `None`/`false` means the flag was not given, so the options file (or the
/// formatter default) decides.
#[derive(Debug, Default)]
pub struct FormatRequest {
    pub options: Option<Value>,
    pub locale: Option<String>,
    pub html: bool,
    pub postal_label: Option<String>,
    pub no_upcase: bool,
}

/// Formats `address`; plain text unless markup is requested.
pub fn format_address(
    dataset: Dataset,
    address: &Address,
    request: FormatRequest,
) -> anyhow::Result<String> {
    match request.postal_label {
        Some(origin) => {
            let defaults = match request.options {
                Some(raw) => PostalLabelOptions::from_json_value(raw)?,
                None => PostalLabelOptions::new(),
            };
            let mut overrides = PostalLabelOptions::new().origin_country(origin);
            if let Some(locale) = request.locale {
                overrides = overrides.locale(locale);
            }
            if request.html {
                overrides = overrides.html(true);
            }
            if request.no_upcase {
                overrides = overrides.upcase(false);
            }
            tracing::debug!(?defaults, ?overrides, "formatting postal label");
            let formatter = PostalLabelFormatter::with_dataset(dataset, defaults);
            Ok(formatter.format_with(address, &overrides)?)
        }
        None => {
            // Unlike the library, the CLI prints text by default.
            let defaults = match request.options {
                Some(raw) => FormatterOptions::new()
                    .html(false)
                    .merge(&FormatterOptions::from_json_value(raw)?),
                None => FormatterOptions::new().html(false),
            };
            let mut overrides = FormatterOptions::new();
            if let Some(locale) = request.locale {
                overrides = overrides.locale(locale);
            }
            if request.html {
                overrides = overrides.html(true);
            }
            let formatter = DefaultFormatter::with_dataset(dataset, defaults);
            Ok(formatter.format_with(address, &overrides)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn us_address() -> Address {
        build_address("US", &["locality=X".into(), "address_line1=Y".into()], None).unwrap()
    }

    #[test]
    fn fields_are_parsed_into_the_address() {
        let address = build_address(
            "US",
            &["locality=Mountain View".into(), "postal_code=94043".into()],
            Some("en"),
        )
        .unwrap();
        assert_eq!(address.country_code(), "US");
        assert_eq!(address.locality(), "Mountain View");
        assert_eq!(address.postal_code(), "94043");
        assert_eq!(address.locale(), "en");
    }

    #[test]
    fn values_may_contain_equals_signs() {
        let address = build_address("US", &["address_line1=a=b".into()], None).unwrap();
        assert_eq!(address.address_line1(), "a=b");
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(build_address("US", &["locality".into()], None).is_err());
        assert!(build_address("US", &["country=US".into()], None).is_err());
        assert!(build_overrides(&["postal_code=sometimes".into()]).is_err());
    }

    #[test]
    fn plain_text_unless_asked() {
        let request = FormatRequest::default();
        let out = format_address(Dataset::default(), &us_address(), request).unwrap();
        assert_eq!(out, "Y\nX\nUnited States");
    }

    #[test]
    fn options_file_supplies_the_defaults() {
        let name = format!("addressing-cli-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, r#"{"html": true, "locale": "fr"}"#).unwrap();
        let options = read_options(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let request = FormatRequest {
            options: Some(options),
            ..Default::default()
        };
        let out = format_address(Dataset::default(), &us_address(), request).unwrap();
        assert!(out.starts_with("<p translate=\"no\">"));
        assert!(out.contains("États-Unis"));
    }

    #[test]
    fn flags_beat_the_options_file() {
        let request = FormatRequest {
            options: Some(json!({"html": true, "locale": "fr"})),
            locale: Some("es".into()),
            ..Default::default()
        };
        let out = format_address(Dataset::default(), &us_address(), request).unwrap();
        assert!(out.contains("Estados Unidos"));
        assert!(out.starts_with("<p"));
    }

    #[test]
    fn postal_label_reads_locale_from_the_options_file() {
        let request = FormatRequest {
            options: Some(json!({"locale": "fr"})),
            postal_label: Some("FR".into()),
            no_upcase: true,
            ..Default::default()
        };
        let out = format_address(Dataset::default(), &us_address(), request).unwrap();
        assert_eq!(out, "Y\nX\nÉtats-Unis - United States");
    }

    #[test]
    fn overrides_are_parsed() {
        let overrides = build_overrides(&["postal_code=hidden".into()]).unwrap();
        assert!(overrides.is_hidden(AddressField::PostalCode));
    }
}
