// crates/addressing-core/src/formatter/options.rs

//! Formatter options.
//!
//! Options are sparse: every field is optional and unset fields fall back to
//! the formatter defaults, then to the built-in defaults. Untyped input
//! (JSON from a config file or a host language) goes through
//! `from_json_value`, which rejects unknown keys and wrongly typed values.

use crate::error::{AddressingError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_LOCALE: &str = "en";

/// A single attribute value; lists render space-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    List(Vec<String>),
}

impl AttributeValue {
    pub fn render(&self) -> String {
        match self {
            AttributeValue::Single(value) => value.clone(),
            AttributeValue::List(values) => values.join(" "),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Single(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Single(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::List(values)
    }
}

/// Markup attributes, rendered in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlAttributes(Vec<(String, AttributeValue)>);

impl HtmlAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an earlier value in place.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_json(option: &'static str, value: &Value) -> Result<Self> {
        let invalid = || AddressingError::InvalidOptionType {
            option,
            expected: "a hash",
        };
        let map = value.as_object().ok_or_else(invalid)?;

        let mut attributes = HtmlAttributes::new();
        for (name, value) in map {
            let value = match value {
                Value::String(s) => AttributeValue::Single(s.clone()),
                Value::Array(items) => AttributeValue::List(
                    items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                        .collect::<Result<_>>()?,
                ),
                _ => return Err(invalid()),
            };
            attributes.insert(name.clone(), value);
        }
        Ok(attributes)
    }
}

impl From<std::collections::BTreeMap<String, AttributeValue>> for HtmlAttributes {
    fn from(map: std::collections::BTreeMap<String, AttributeValue>) -> Self {
        Self(map.into_iter().collect())
    }
}

struct HtmlAttributesVisitor;

impl<'de> Visitor<'de> for HtmlAttributesVisitor {
    type Value = HtmlAttributes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of attribute names to strings or string lists")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut attributes = HtmlAttributes::new();
        while let Some((name, value)) = access.next_entry::<String, AttributeValue>()? {
            attributes.insert(name, value);
        }
        Ok(attributes)
    }
}

// Entries are read in document order.
impl<'de> Deserialize<'de> for HtmlAttributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(HtmlAttributesVisitor)
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for HtmlAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = HtmlAttributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

impl Serialize for HtmlAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ----------------------------------------------------------------------------
// Raw option parsing
// ----------------------------------------------------------------------------

fn as_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(AddressingError::InvalidOptionType {
            option: "options",
            expected: "a hash",
        }),
    }
}

fn as_bool(option: &'static str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or(AddressingError::InvalidOptionType {
        option,
        expected: "a boolean",
    })
}

fn as_string(option: &'static str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(AddressingError::InvalidOptionType {
            option,
            expected: "a string",
        })
}

/// Options of [`DefaultFormatter`](super::DefaultFormatter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct FormatterOptions {
    /// Display locale for the country name. Default `en`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Render markup instead of plain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<bool>,
    /// Wrapper element. Default `p`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_tag: Option<String>,
    /// Wrapper attributes. Default `translate="no"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_attributes: Option<HtmlAttributes>,
}

impl FormatterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn html(mut self, html: bool) -> Self {
        self.html = Some(html);
        self
    }

    #[must_use]
    pub fn html_tag(mut self, tag: impl Into<String>) -> Self {
        self.html_tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn html_attributes(mut self, attributes: HtmlAttributes) -> Self {
        self.html_attributes = Some(attributes);
        self
    }

    /// Options set in `overrides` win.
    #[must_use]
    pub fn merge(&self, overrides: &FormatterOptions) -> Self {
        Self {
            locale: overrides.locale.clone().or_else(|| self.locale.clone()),
            html: overrides.html.or(self.html),
            html_tag: overrides.html_tag.clone().or_else(|| self.html_tag.clone()),
            html_attributes: overrides
                .html_attributes
                .clone()
                .or_else(|| self.html_attributes.clone()),
        }
    }

    /// Parses a raw options map against the option whitelist.
    pub fn from_json_value(value: Value) -> Result<Self> {
        Self::from_map(as_object(value)?)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self> {
        let mut options = FormatterOptions::default();
        for (key, value) in &map {
            match key.as_str() {
                "locale" => options.locale = Some(as_string("locale", value)?),
                "html" => options.html = Some(as_bool("html", value)?),
                "html_tag" => options.html_tag = Some(as_string("html_tag", value)?),
                "html_attributes" => {
                    options.html_attributes =
                        Some(HtmlAttributes::from_json("html_attributes", value)?)
                }
                _ => return Err(AddressingError::UnrecognizedOption(key.clone())),
            }
        }
        Ok(options)
    }

    pub(crate) fn resolve(&self, default_html: bool) -> ResolvedOptions {
        ResolvedOptions {
            locale: self
                .locale
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            html: self.html.unwrap_or(default_html),
            html_tag: self.html_tag.clone().unwrap_or_else(|| "p".to_string()),
            html_attributes: self
                .html_attributes
                .clone()
                .unwrap_or_else(|| HtmlAttributes::new().with("translate", "no")),
        }
    }
}

impl TryFrom<Value> for FormatterOptions {
    type Error = AddressingError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json_value(value)
    }
}

/// Options of [`PostalLabelFormatter`](super::PostalLabelFormatter).
///
/// Markup is off by default. `origin_country` must be set, either on the
/// formatter or per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct PostalLabelOptions {
    #[serde(flatten)]
    pub formatter: FormatterOptions,
    /// Country the mail is sent from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
    /// Uppercase format-designated fields and the country line. Default on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcase: Option<bool>,
}

impl PostalLabelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn origin_country(mut self, country_code: impl Into<String>) -> Self {
        self.origin_country = Some(country_code.into());
        self
    }

    #[must_use]
    pub fn upcase(mut self, upcase: bool) -> Self {
        self.upcase = Some(upcase);
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.formatter.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn html(mut self, html: bool) -> Self {
        self.formatter.html = Some(html);
        self
    }

    #[must_use]
    pub fn merge(&self, overrides: &PostalLabelOptions) -> Self {
        Self {
            formatter: self.formatter.merge(&overrides.formatter),
            origin_country: overrides
                .origin_country
                .clone()
                .or_else(|| self.origin_country.clone()),
            upcase: overrides.upcase.or(self.upcase),
        }
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        let mut map = as_object(value)?;
        let origin_country = map
            .remove("origin_country")
            .map(|v| as_string("origin_country", &v))
            .transpose()?;
        let upcase = map
            .remove("upcase")
            .map(|v| as_bool("upcase", &v))
            .transpose()?;
        Ok(Self {
            formatter: FormatterOptions::from_map(map)?,
            origin_country,
            upcase,
        })
    }
}

impl TryFrom<Value> for PostalLabelOptions {
    type Error = AddressingError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json_value(value)
    }
}

/// Options with every default applied.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedOptions {
    pub locale: String,
    pub html: bool,
    pub html_tag: String,
    pub html_attributes: HtmlAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_options_are_rejected() {
        let err = FormatterOptions::from_json_value(json!({"key": "value"})).unwrap_err();
        assert!(matches!(err, AddressingError::UnrecognizedOption(ref k) if k == "key"));

        let err = FormatterOptions::from_json_value(json!({"upcase": true})).unwrap_err();
        assert!(matches!(err, AddressingError::UnrecognizedOption(_)));
        assert!(PostalLabelOptions::from_json_value(json!({"upcase": true})).is_ok());
    }

    #[test]
    fn option_types_are_checked() {
        let err = FormatterOptions::from_json_value(json!({"html": "INVALID"})).unwrap_err();
        assert_eq!(err.to_string(), "The option `html` must be a boolean.");

        let err =
            FormatterOptions::from_json_value(json!({"html_attributes": "INVALID"})).unwrap_err();
        assert_eq!(err.to_string(), "The option `html_attributes` must be a hash.");

        let err = PostalLabelOptions::from_json_value(json!({"upcase": 1})).unwrap_err();
        assert!(matches!(err, AddressingError::InvalidOptionType { option: "upcase", .. }));
    }

    #[test]
    fn attributes_accept_strings_and_lists() {
        let options = FormatterOptions::from_json_value(json!({
            "html_attributes": {"translate": "no", "class": ["address", "postal"]}
        }))
        .unwrap();
        let attributes = options.html_attributes.unwrap();
        let rendered: Vec<_> = attributes.iter().map(|(k, v)| (k, v.render())).collect();
        assert_eq!(
            rendered,
            vec![("translate", "no".to_string()), ("class", "address postal".to_string())]
        );
    }

    #[test]
    fn attributes_keep_input_order() {
        let raw = json!({"translate": "no", "class": "addr", "aria-label": "x"});
        let expected = vec!["translate", "class", "aria-label"];

        let options = FormatterOptions::from_json_value(json!({ "html_attributes": raw })).unwrap();
        let names: Vec<_> = options
            .html_attributes
            .unwrap()
            .iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(names, expected);

        let attributes: HtmlAttributes =
            serde_json::from_str(r#"{"translate": "no", "class": "addr", "aria-label": "x"}"#)
                .unwrap();
        let names: Vec<_> = attributes.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn merge_keeps_unset_defaults() {
        let defaults = FormatterOptions::new().locale("fr").html(false);
        let merged = defaults.merge(&FormatterOptions::new().html(true));
        assert_eq!(merged.locale.as_deref(), Some("fr"));
        assert_eq!(merged.html, Some(true));

        let resolved = FormatterOptions::new().resolve(true);
        assert_eq!(resolved.locale, "en");
        assert_eq!(resolved.html_tag, "p");
        assert_eq!(
            resolved.html_attributes,
            HtmlAttributes::new().with("translate", "no")
        );
    }

    #[test]
    fn deserializes_through_the_whitelist() {
        let raw = r#"{"origin_country":"FR","locale":"fr","upcase":false}"#;
        let options: PostalLabelOptions = serde_json::from_str(raw).unwrap();
        assert_eq!(options.origin_country.as_deref(), Some("FR"));
        assert_eq!(options.formatter.locale.as_deref(), Some("fr"));
        assert_eq!(options.upcase, Some(false));

        assert!(serde_json::from_str::<FormatterOptions>(r#"{"nope":1}"#).is_err());
    }
}
