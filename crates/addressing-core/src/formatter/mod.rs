// crates/addressing-core/src/formatter/mod.rs

//! # Formatters
//!
//! Both formatters share one pipeline:
//!
//! 1. pick the template (local or international) for the address format,
//! 2. build a *view*: one element per used field plus the country,
//! 3. render each element (escaped markup or tag-stripped text),
//! 4. substitute `%placeholders`, clean up the lines, wrap markup output.
//!
//! [`PostalLabelFormatter`] adjusts the view between steps 2 and 3.

mod default;
mod options;
mod postal_label;

pub use default::DefaultFormatter;
pub use options::{
    AttributeValue, FormatterOptions, HtmlAttributes, PostalLabelOptions, DEFAULT_LOCALE,
};
pub use postal_label::PostalLabelFormatter;

use crate::address::Address;
use crate::address_format::AddressFormat;
use crate::dataset::Dataset;
use crate::enums::AddressField;
use crate::error::Result;
use crate::locale;
use once_cell::sync::Lazy;
use options::ResolvedOptions;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[a-z1-9_]+").expect("valid regex"));
static EDGE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[ \-,]+|[ \-,]+\z").expect("valid regex"));
static MULTIPLE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\s+").expect("valid regex"));
static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]*>").expect("valid regex"));

pub(crate) const COUNTRY: &str = "country";

/// One renderable slot of the output.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub html: bool,
    pub class: String,
    pub value: String,
}

/// Elements in template order: used fields, then the country.
pub(crate) type View = Vec<(String, Element)>;

pub(crate) fn view_value_mut<'a>(view: &'a mut View, key: &str) -> Option<&'a mut String> {
    view.iter_mut()
        .find(|(k, _)| k == key)
        .map(|(_, element)| &mut element.value)
}

/// Per-locale country name lists, shared by a formatter's calls.
#[derive(Debug, Default)]
pub(crate) struct CountryListCache {
    lists: Mutex<HashMap<String, Arc<BTreeMap<String, String>>>>,
}

impl CountryListCache {
    pub fn get(&self, dataset: &Dataset, locale: &str) -> Result<Arc<BTreeMap<String, String>>> {
        if let Some(list) = self
            .lists
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
        {
            trace!(locale, "country list cache hit");
            return Ok(Arc::clone(list));
        }

        let list = Arc::new(dataset.countries().list(locale, Some(DEFAULT_LOCALE))?);
        let mut lists = self.lists.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(lists.entry(locale.to_string()).or_insert(list)))
    }
}

/// Local template (country on top) when the address locale shares a
/// candidate with the format locale, international template otherwise.
pub(crate) fn format_string(address_format: &AddressFormat, address: &Address) -> String {
    let local_format = address_format.local_format().filter(|_| {
        address_format
            .locale()
            .is_some_and(|own| locale::match_candidates(own, address.locale()))
    });

    match local_format {
        Some(local_format) => format!("%{COUNTRY}\n{local_format}"),
        None => format!("{}\n%{COUNTRY}", address_format.format()),
    }
}

pub(crate) fn build_view(
    dataset: &Dataset,
    address: &Address,
    address_format: &AddressFormat,
    options: &ResolvedOptions,
    countries: &BTreeMap<String, String>,
) -> Result<View> {
    let mut values: HashMap<AddressField, String> = AddressField::ALL
        .iter()
        .map(|field| (*field, address.get(*field).to_string()))
        .collect();
    resolve_subdivision_values(dataset, &mut values, address, address_format)?;

    let country = countries
        .get(address.country_code())
        .cloned()
        .unwrap_or_else(|| address.country_code().to_string());

    let mut view: View = address_format
        .used_fields()
        .iter()
        .map(|field| {
            let element = Element {
                html: options.html,
                class: field.css_class(),
                value: values.remove(field).unwrap_or_default(),
            };
            (field.as_str().to_string(), element)
        })
        .collect();
    view.push((
        COUNTRY.to_string(),
        Element {
            html: options.html,
            class: COUNTRY.to_string(),
            value: country,
        },
    ));
    Ok(view)
}

/// Replaces subdivision ids with their display codes, level by level.
fn resolve_subdivision_values(
    dataset: &Dataset,
    values: &mut HashMap<AddressField, String>,
    address: &Address,
    address_format: &AddressFormat,
) -> Result<()> {
    let mut parents = vec![address.country_code().to_string()];

    for field in address_format.used_subdivision_fields() {
        let Some(id) = values.get(&field).cloned() else {
            break;
        };
        if id.is_empty() {
            break;
        }

        let Some(subdivision) = dataset.subdivisions().get(&id, &parents)? else {
            break;
        };

        let use_local = subdivision
            .locale()
            .is_some_and(|own| locale::match_candidates(address.locale(), own));
        let display = match (use_local, subdivision.local_code()) {
            (true, Some(local_code)) => local_code,
            _ => subdivision.code(),
        };
        values.insert(field, display.to_string());

        if !subdivision.has_children() {
            break;
        }
        // The raw value is the id of the next level's parent.
        parents.push(id);
    }
    Ok(())
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_attributes(attributes: &HtmlAttributes) -> String {
    attributes
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", name, escape_html(&value.render())))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_element(tag: &str, attributes: &HtmlAttributes, value: &str) -> String {
    format!("<{tag} {}>{value}</{tag}>", render_attributes(attributes))
}

fn render_view(view: View) -> HashMap<String, String> {
    view.into_iter()
        .map(|(key, element)| {
            let rendered = if element.value.is_empty() {
                String::new()
            } else if element.html {
                let attributes = HtmlAttributes::new().with("class", element.class);
                render_element("span", &attributes, &escape_html(&element.value))
            } else {
                TAGS.replace_all(&element.value, "").into_owned()
            };
            (format!("%{key}"), rendered)
        })
        .collect()
}

/// Drops empty lines, edge punctuation and repeated whitespace.
pub(crate) fn clean_output(output: &str) -> String {
    output
        .split('\n')
        .map(|line| {
            let line = EDGE_PUNCTUATION.replace_all(line, "");
            MULTIPLE_SPACES.replace_all(line.trim(), " ").into_owned()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Steps 3 and 4 of the pipeline.
pub(crate) fn render(view: View, format_string: &str, options: &ResolvedOptions) -> String {
    let replacements = render_view(view);
    let output = PLACEHOLDER.replace_all(format_string, |caps: &regex::Captures<'_>| {
        replacements.get(&caps[0]).cloned().unwrap_or_default()
    });
    let output = clean_output(&output);

    if options.html {
        let output = output.replace('\n', "<br>\n");
        render_element(
            &options.html_tag,
            &options.html_attributes,
            &format!("\n{output}\n"),
        )
    } else {
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_output_trims_lines() {
        assert_eq!(
            clean_output("  , Mountain View,  CA   94043 -\n\n- \nUnited States"),
            "Mountain View, CA 94043\nUnited States"
        );
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">O'Neil & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#39;Neil &amp; co&lt;/a&gt;"
        );
    }

    #[test]
    fn unknown_placeholders_vanish() {
        let options = FormatterOptions::new().html(false).resolve(false);
        let view: View = vec![(
            "locality".to_string(),
            Element {
                html: false,
                class: "locality".into(),
                value: "<b>Paris</b>".into(),
            },
        )];
        assert_eq!(render(view, "%recipient\n%locality %nothing", &options), "Paris");
    }

    #[test]
    fn markup_wraps_the_block() {
        let options = FormatterOptions::new().resolve(true);
        let view: View = vec![(
            "locality".to_string(),
            Element {
                html: true,
                class: "locality".into(),
                value: "Paris".into(),
            },
        )];
        assert_eq!(
            render(view, "%locality\n%locality", &options),
            "<p translate=\"no\">\n<span class=\"locality\">Paris</span><br>\n\
             <span class=\"locality\">Paris</span>\n</p>"
        );
    }
}
