// crates/addressing-core/src/validate.rs

//! Address validation as plain functions over the registries.
//!
//! Hosts (form layers, ORMs) call [`AddressValidator::validate`] and map the
//! returned [`Violation`]s onto their own error reporting.

use crate::address::Address;
use crate::address_format::{AddressFormat, AddressFormatHelper};
use crate::dataset::Dataset;
use crate::enums::{AddressField, PatternType};
use crate::error::{AddressingError, Result};
use crate::field_override::FieldOverrides;
use crate::subdivision::Subdivision;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

type PatternKey = (String, PatternType);

/// Compiled postal patterns, shared by every validator.
static COMPILED_PATTERNS: Lazy<Mutex<HashMap<PatternKey, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is blank.
    Blank,
    /// A field the format does not use has a value.
    NotBlank,
    /// Unknown subdivision or postal code mismatch.
    Invalid,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViolationKind::Blank => "should not be blank",
            ViolationKind::NotBlank => "should be blank",
            ViolationKind::Invalid => "should be valid",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    pub field: AddressField,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: AddressField, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.kind)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Compiles a postal code pattern, anchored at the start and, for
/// [`PatternType::Full`], at the end. Matching ignores case.
pub fn compile_postal_pattern(pattern: &str, pattern_type: PatternType) -> Result<Regex> {
    let anchored = match pattern_type {
        PatternType::Full => format!("^(?:{pattern})$"),
        PatternType::Start => format!("^(?:{pattern})"),
    };
    RegexBuilder::new(&anchored)
        .case_insensitive(true)
        .build()
        .map_err(|source| AddressingError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// [`compile_postal_pattern`] through a process-wide cache. `Regex` clones
/// share the compiled program.
pub fn cached_postal_pattern(pattern: &str, pattern_type: PatternType) -> Result<Regex> {
    let key = (pattern.to_string(), pattern_type);
    if let Some(regex) = COMPILED_PATTERNS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        trace!(pattern, "postal pattern cache hit");
        return Ok(regex.clone());
    }

    let regex = compile_postal_pattern(pattern, pattern_type)?;
    let mut compiled = COMPILED_PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(compiled.entry(key).or_insert(regex).clone())
}

/// The most specific postal pattern: the deepest subdivision that has one,
/// else the country pattern (always [`PatternType::Full`]).
pub fn postal_code_pattern_for(
    address_format: &AddressFormat,
    subdivisions: &[Arc<Subdivision>],
) -> Option<(String, PatternType)> {
    subdivisions
        .iter()
        .rev()
        .find_map(|subdivision| {
            let pattern = subdivision.postal_code_pattern()?;
            (!is_blank(pattern)).then(|| {
                (
                    pattern.to_string(),
                    subdivision.pattern_type().unwrap_or_default(),
                )
            })
        })
        .or_else(|| {
            address_format
                .postal_code_pattern()
                .map(|pattern| (pattern.to_string(), PatternType::Full))
        })
}

/// Postal code patterns in effect for an address.
///
/// `full` starts out as the country pattern and is replaced by any
/// subdivision declaring a full pattern. `start` is the deepest subdivision
/// prefix pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalCodePatterns {
    pub full: Option<String>,
    pub start: Option<String>,
}

impl PostalCodePatterns {
    /// Whether `postal_code` satisfies every pattern present.
    pub fn is_match(&self, postal_code: &str) -> Result<bool> {
        if let Some(pattern) = &self.full {
            if !cached_postal_pattern(pattern, PatternType::Full)?.is_match(postal_code) {
                return Ok(false);
            }
        }
        if let Some(pattern) = &self.start {
            if !cached_postal_pattern(pattern, PatternType::Start)?.is_match(postal_code) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

pub fn postal_code_patterns(
    address_format: &AddressFormat,
    subdivisions: &[Arc<Subdivision>],
) -> PostalCodePatterns {
    let mut patterns = PostalCodePatterns {
        full: address_format.postal_code_pattern().map(str::to_string),
        start: None,
    };
    for subdivision in subdivisions {
        let Some(pattern) = subdivision.postal_code_pattern().filter(|p| !is_blank(p)) else {
            continue;
        };
        match subdivision.pattern_type().unwrap_or_default() {
            PatternType::Full => patterns.full = Some(pattern.to_string()),
            PatternType::Start => patterns.start = Some(pattern.to_string()),
        }
    }
    patterns
}

/// Validates addresses against their country's format and subdivisions.
#[derive(Debug, Clone)]
pub struct AddressValidator {
    dataset: Dataset,
    field_overrides: FieldOverrides,
}

impl Default for AddressValidator {
    fn default() -> Self {
        Self::new(Dataset::global().clone())
    }
}

impl AddressValidator {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            field_overrides: FieldOverrides::default(),
        }
    }

    #[must_use]
    pub fn with_field_overrides(mut self, field_overrides: FieldOverrides) -> Self {
        self.field_overrides = field_overrides;
        self
    }

    /// Every violation found, in check order. An address without a country
    /// code is not validated.
    pub fn validate(&self, address: &Address) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        if is_blank(address.country_code()) {
            return Ok(violations);
        }

        let address_format = self
            .dataset
            .address_formats()
            .get(address.country_code())?;

        for field in AddressFormatHelper::required_fields(&address_format, &self.field_overrides) {
            if is_blank(address.get(field)) {
                violations.push(Violation::new(field, ViolationKind::Blank));
            }
        }

        let used_fields: Vec<AddressField> = address_format
            .used_fields()
            .iter()
            .copied()
            .filter(|field| !self.field_overrides.is_hidden(*field))
            .collect();

        for field in AddressField::ALL {
            if !used_fields.contains(field) && !is_blank(address.get(*field)) {
                violations.push(Violation::new(*field, ViolationKind::NotBlank));
            }
        }

        let subdivisions = self.verify_subdivisions(address, &address_format, &mut violations)?;

        if used_fields.contains(&AddressField::PostalCode) {
            self.verify_postal_code(
                address.postal_code(),
                &subdivisions,
                &address_format,
                &mut violations,
            )?;
        }

        Ok(violations)
    }

    fn verify_subdivisions(
        &self,
        address: &Address,
        address_format: &AddressFormat,
        violations: &mut Vec<Violation>,
    ) -> Result<Vec<Arc<Subdivision>>> {
        let mut subdivisions = Vec::new();
        if address_format.subdivision_depth() < 1 {
            return Ok(subdivisions);
        }

        let mut parents = vec![address_format.country_code().to_string()];
        for field in address_format.used_subdivision_fields() {
            let value = address.get(field);
            if is_blank(value) || self.field_overrides.is_hidden(field) {
                break;
            }

            let Some(subdivision) = self.dataset.subdivisions().get(value, &parents)? else {
                violations.push(Violation::new(field, ViolationKind::Invalid));
                break;
            };

            let has_children = subdivision.has_children();
            subdivisions.push(subdivision);
            if !has_children {
                break;
            }
            parents.push(value.to_string());
        }

        Ok(subdivisions)
    }

    fn verify_postal_code(
        &self,
        postal_code: &str,
        subdivisions: &[Arc<Subdivision>],
        address_format: &AddressFormat,
        violations: &mut Vec<Violation>,
    ) -> Result<()> {
        if is_blank(postal_code) {
            return Ok(());
        }

        if !postal_code_patterns(address_format, subdivisions).is_match(postal_code)? {
            violations.push(Violation::new(AddressField::PostalCode, ViolationKind::Invalid));
        }
        Ok(())
    }
}
