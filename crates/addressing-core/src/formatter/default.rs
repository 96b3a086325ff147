// crates/addressing-core/src/formatter/default.rs

use super::{build_view, format_string, render, CountryListCache, FormatterOptions};
use crate::address::Address;
use crate::dataset::Dataset;
use crate::error::Result;
use serde_json::Value;

/// Formats addresses for display, as markup (default) or plain text.
#[derive(Debug)]
pub struct DefaultFormatter {
    dataset: Dataset,
    defaults: FormatterOptions,
    countries: CountryListCache,
}

impl Default for DefaultFormatter {
    fn default() -> Self {
        Self::new(FormatterOptions::default())
    }
}

impl DefaultFormatter {
    /// Formatter over the process-wide dataset.
    pub fn new(defaults: FormatterOptions) -> Self {
        Self::with_dataset(Dataset::global().clone(), defaults)
    }

    pub fn with_dataset(dataset: Dataset, defaults: FormatterOptions) -> Self {
        Self {
            dataset,
            defaults,
            countries: CountryListCache::default(),
        }
    }

    /// Builds a formatter from raw default options.
    pub fn from_json(defaults: Value) -> Result<Self> {
        Ok(Self::new(FormatterOptions::from_json_value(defaults)?))
    }

    pub fn defaults(&self) -> &FormatterOptions {
        &self.defaults
    }

    pub fn format(&self, address: &Address) -> Result<String> {
        self.format_with(address, &FormatterOptions::default())
    }

    /// Formats with per-call `overrides` on top of the formatter defaults.
    pub fn format_with(&self, address: &Address, overrides: &FormatterOptions) -> Result<String> {
        let options = self.defaults.merge(overrides).resolve(true);
        let address_format = self
            .dataset
            .address_formats()
            .get(address.country_code())?;
        let countries = self.countries.get(&self.dataset, &options.locale)?;

        let template = format_string(&address_format, address);
        let view = build_view(&self.dataset, address, &address_format, &options, &countries)?;
        Ok(render(view, &template, &options))
    }

    /// Formats with raw per-call options, validated like [`FormatterOptions::from_json_value`].
    pub fn format_json(&self, address: &Address, overrides: Value) -> Result<String> {
        self.format_with(address, &FormatterOptions::from_json_value(overrides)?)
    }
}
