// crates/addressing-core/src/subdivision/mod.rs

//! # Subdivisions
//!
//! Countries are split into up to three levels (administrative area,
//! locality, dependent locality). Each level under one parent is a *group*,
//! loaded on first use and cached by [`SubdivisionRepository`].
//!
//! Nodes never own their parent: a [`Subdivision`] keeps the parent's lookup
//! key and resolves it through the repository's parent cache, and its
//! children sit behind a [`LazySubdivisions`] that loads on first access.

mod lazy;
mod repository;

pub use lazy::LazySubdivisions;
pub use repository::SubdivisionRepository;

use crate::enums::PatternType;
use crate::error::{AddressingError, Result};
use repository::Inner;
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

/// Builds the cache/resource key for the subdivisions under `parents`.
///
/// * `["BR"]` gives `BR`.
/// * `["BR", "SC"]` gives `BR-SC` (short code-like parent).
/// * Longer paths give the country, one dash per remaining parent and the
///   SHA-1 of the remaining parents joined by `-`, e.g.
///   `["CN", "Taiwan", "Taichung City"]` gives `CN--7c83…`.
///
/// Returns `None` for an empty chain.
pub fn build_group<S: AsRef<str>>(parents: &[S]) -> Option<String> {
    let (country_code, rest) = parents.split_first()?;
    let mut group = country_code.as_ref().to_uppercase();

    match rest {
        [] => {}
        [code] if is_short_code(code.as_ref()) => {
            group.push('-');
            group.push_str(code.as_ref());
        }
        _ => {
            group.push_str(&"-".repeat(rest.len()));
            let joined = rest
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join("-");
            group.push_str(&hex::encode(Sha1::digest(joined.as_bytes())));
        }
    }

    Some(group)
}

fn is_short_code(value: &str) -> bool {
    !value.is_empty() && value.len() <= 3 && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Input for [`Subdivision::new`]; also the processed form of a dataset record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubdivisionDefinition {
    pub country_code: Option<String>,
    pub id: Option<String>,
    pub locale: Option<String>,
    pub code: Option<String>,
    pub local_code: Option<String>,
    pub name: Option<String>,
    pub local_name: Option<String>,
    pub iso_code: Option<String>,
    pub postal_code_pattern: Option<String>,
    pub pattern_type: Option<PatternType>,
    pub has_children: bool,
}

/// Lookup key of a subdivision's parent: the parent's own parent chain and
/// its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ParentKey {
    pub parents: Vec<String>,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Subdivision {
    id: String,
    country_code: String,
    locale: Option<String>,
    code: String,
    local_code: Option<String>,
    name: String,
    local_name: Option<String>,
    iso_code: Option<String>,
    postal_code_pattern: Option<String>,
    pattern_type: Option<PatternType>,
    #[serde(skip)]
    parent: Option<ParentKey>,
    #[serde(skip)]
    children: LazySubdivisions,
    #[serde(skip)]
    repository: Weak<Inner>,
}

impl Subdivision {
    /// Builds a detached subdivision (no parent, no children).
    ///
    /// `code` defaults to the id and `name` to the code.
    pub fn new(definition: SubdivisionDefinition) -> Result<Self> {
        Self::build(definition, None, Weak::new(), &[])
    }

    pub(crate) fn build(
        definition: SubdivisionDefinition,
        parent: Option<ParentKey>,
        repository: Weak<Inner>,
        parents: &[String],
    ) -> Result<Self> {
        let country_code = definition
            .country_code
            .ok_or(AddressingError::MissingProperty("country_code"))?;
        let id = definition.id.ok_or(AddressingError::MissingProperty("id"))?;
        let code = definition.code.unwrap_or_else(|| id.clone());
        let name = definition
            .name
            .ok_or(AddressingError::MissingProperty("name"))?;

        let children = if definition.has_children && !parents.is_empty() {
            let mut children_parents = parents.to_vec();
            children_parents.push(id.clone());
            LazySubdivisions::new(children_parents, repository.clone())
        } else {
            LazySubdivisions::empty()
        };

        let pattern_type = match (&definition.postal_code_pattern, definition.pattern_type) {
            (Some(_), None) => Some(PatternType::default()),
            (_, pattern_type) => pattern_type,
        };

        Ok(Self {
            id,
            country_code,
            locale: definition.locale,
            code,
            local_code: definition.local_code,
            name,
            local_name: definition.local_name,
            iso_code: definition.iso_code,
            postal_code_pattern: definition.postal_code_pattern,
            pattern_type,
            parent,
            children,
            repository,
        })
    }

    /// Looks a subdivision up in the process-wide [`Dataset`](crate::Dataset).
    pub fn get<S: AsRef<str>>(id: &str, parents: &[S]) -> Result<Option<Arc<Subdivision>>> {
        crate::Dataset::global().subdivisions().get(id, parents)
    }

    /// Every subdivision under `parents` in the process-wide dataset.
    pub fn all<S: AsRef<str>>(parents: &[S]) -> Result<BTreeMap<String, Arc<Subdivision>>> {
        crate::Dataset::global().subdivisions().all(parents)
    }

    /// `id => display name` under `parents`, using local names when `locale`
    /// matches the dataset locale.
    pub fn list<S: AsRef<str>>(
        parents: &[S],
        locale: Option<&str>,
    ) -> Result<BTreeMap<String, String>> {
        crate::Dataset::global().subdivisions().list(parents, locale)
    }

    /// Key of this subdivision among its siblings.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn local_code(&self) -> Option<&str> {
        self.local_code.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    pub fn iso_code(&self) -> Option<&str> {
        self.iso_code.as_deref()
    }

    pub fn postal_code_pattern(&self) -> Option<&str> {
        self.postal_code_pattern.as_deref()
    }

    pub fn pattern_type(&self) -> Option<PatternType> {
        self.pattern_type
    }

    /// Resolves the parent through the repository's parent cache.
    pub fn parent(&self) -> Option<Arc<Subdivision>> {
        let key = self.parent.as_ref()?;
        let repository = SubdivisionRepository::from_weak(&self.repository)?;
        repository.cached_parent(key)
    }

    pub fn children(&self) -> &LazySubdivisions {
        &self.children
    }

    /// Loads the children (only for nodes declared with children).
    pub fn has_children(&self) -> bool {
        self.children.any()
    }
}

impl PartialEq for Subdivision {
    fn eq(&self, other: &Self) -> bool {
        self.country_code == other.country_code
            && self.parent == other.parent
            && self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_for_top_level_is_the_country() {
        assert_eq!(build_group(&["br"]).as_deref(), Some("BR"));
        assert_eq!(build_group::<&str>(&[]), None);
    }

    #[test]
    fn group_for_short_second_parent_is_joined() {
        assert_eq!(build_group(&["BR", "SC"]).as_deref(), Some("BR-SC"));
        assert_eq!(build_group(&["US", "CA"]).as_deref(), Some("US-CA"));
    }

    #[test]
    fn group_for_long_parents_is_hashed() {
        assert_eq!(
            build_group(&["TW", "Taipei City"]).as_deref(),
            Some("TW-62457c5125b9883ae4ab7fca3f239a06c5810960")
        );
        assert_eq!(
            build_group(&["CN", "Taiwan", "Taichung City"]).as_deref(),
            Some("CN--7c83729bec5e4f5547c102d1fbe2e9e304cff91c")
        );
    }

    #[test]
    fn new_validates_and_fills_defaults() {
        let err = Subdivision::new(SubdivisionDefinition::default()).unwrap_err();
        assert!(matches!(err, AddressingError::MissingProperty("country_code")));

        let err = Subdivision::new(SubdivisionDefinition {
            country_code: Some("US".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, AddressingError::MissingProperty("id")));

        let err = Subdivision::new(SubdivisionDefinition {
            country_code: Some("US".into()),
            id: Some("CA".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, AddressingError::MissingProperty("name")));

        let sub = Subdivision::new(SubdivisionDefinition {
            country_code: Some("US".into()),
            id: Some("CA".into()),
            name: Some("California".into()),
            postal_code_pattern: Some("9[0-5]|96[01]".into()),
            has_children: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(sub.code(), "CA");
        assert_eq!(sub.pattern_type(), Some(PatternType::Start));
        assert!(sub.parent().is_none());
        // Detached: there is nothing to load children from.
        assert!(!sub.has_children());
    }
}
