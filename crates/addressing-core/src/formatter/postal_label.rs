// crates/addressing-core/src/formatter/postal_label.rs

use super::{
    build_view, format_string, render, view_value_mut, CountryListCache, PostalLabelOptions,
    COUNTRY,
};
use crate::address::Address;
use crate::dataset::Dataset;
use crate::enums::AddressField;
use crate::error::{AddressingError, Result};
use serde_json::Value;

/// Formats addresses for shipping labels.
///
/// Fields the format marks as uppercase are uppercased. International mail
/// (destination differs from `origin_country`) gets the postal code prefix
/// and a country line in the display locale followed by the English name;
/// domestic mail gets no country line.
#[derive(Debug)]
pub struct PostalLabelFormatter {
    dataset: Dataset,
    defaults: PostalLabelOptions,
    countries: CountryListCache,
}

impl Default for PostalLabelFormatter {
    fn default() -> Self {
        Self::new(PostalLabelOptions::default())
    }
}

impl PostalLabelFormatter {
    pub fn new(defaults: PostalLabelOptions) -> Self {
        Self::with_dataset(Dataset::global().clone(), defaults)
    }

    pub fn with_dataset(dataset: Dataset, defaults: PostalLabelOptions) -> Self {
        Self {
            dataset,
            defaults,
            countries: CountryListCache::default(),
        }
    }

    pub fn from_json(defaults: Value) -> Result<Self> {
        Ok(Self::new(PostalLabelOptions::from_json_value(defaults)?))
    }

    pub fn defaults(&self) -> &PostalLabelOptions {
        &self.defaults
    }

    pub fn format(&self, address: &Address) -> Result<String> {
        self.format_with(address, &PostalLabelOptions::default())
    }

    pub fn format_with(&self, address: &Address, overrides: &PostalLabelOptions) -> Result<String> {
        let merged = self.defaults.merge(overrides);
        let origin_country = merged
            .origin_country
            .as_deref()
            .filter(|origin| !origin.is_empty())
            .ok_or(AddressingError::MissingOption("origin_country"))?
            .to_uppercase();
        let upcase = merged.upcase.unwrap_or(true);
        let options = merged.formatter.resolve(false);

        let address_format = self
            .dataset
            .address_formats()
            .get(address.country_code())?;
        let countries = self.countries.get(&self.dataset, &options.locale)?;

        let template = format_string(&address_format, address);
        let mut view = build_view(&self.dataset, address, &address_format, &options, &countries)?;

        if upcase {
            for field in address_format.uppercase_fields() {
                if let Some(value) = view_value_mut(&mut view, field.as_str()) {
                    *value = value.to_uppercase();
                }
            }
        }

        if address.country_code().to_uppercase() != origin_country {
            let prefix = address_format.postal_code_prefix().unwrap_or_default();
            let postal_code = view_value_mut(&mut view, AddressField::PostalCode.as_str());
            if let Some(postal_code) = postal_code {
                if !postal_code.is_empty() {
                    postal_code.insert_str(0, prefix);
                }
            }

            // UPU: destination in the origin's language, then an
            // internationally known one.
            let english = self.countries.get(&self.dataset, "en")?;
            if let Some(country) = view_value_mut(&mut view, COUNTRY) {
                if let Some(english_name) = english.get(address.country_code()) {
                    if country.as_str() != english_name.as_str() {
                        country.push_str(" - ");
                        country.push_str(english_name);
                    }
                }
                if upcase {
                    *country = country.to_uppercase();
                }
            }
        } else if let Some(country) = view_value_mut(&mut view, COUNTRY) {
            country.clear();
        }

        Ok(render(view, &template, &options))
    }

    pub fn format_json(&self, address: &Address, overrides: Value) -> Result<String> {
        self.format_with(address, &PostalLabelOptions::from_json_value(overrides)?)
    }
}
