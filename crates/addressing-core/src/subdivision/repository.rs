// crates/addressing-core/src/subdivision/repository.rs

use super::{build_group, ParentKey, Subdivision, SubdivisionDefinition};
use crate::address_format::AddressFormatRepository;
use crate::customizations::SubdivisionCustomization;
use crate::error::Result;
use crate::loader::{DefinitionProvider, SubdivisionGroupDefinition, SubdivisionRecord};
use crate::locale;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, trace, warn};

/// A loaded (and post-processed) group. An empty `subdivisions` map means
/// "checked, nothing there".
#[derive(Debug, Default)]
pub(crate) struct Group {
    locale: Option<String>,
    parents: Vec<String>,
    subdivisions: BTreeMap<String, SubdivisionDefinition>,
}

pub(crate) struct Inner {
    provider: Arc<dyn DefinitionProvider>,
    formats: Arc<AddressFormatRepository>,
    groups: Mutex<HashMap<String, Arc<Group>>>,
    parents: Mutex<HashMap<(String, String), Arc<Subdivision>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lazily loads subdivision groups and hands out shared [`Subdivision`]s.
///
/// Cloning is cheap; clones share the same caches.
#[derive(Clone)]
pub struct SubdivisionRepository {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SubdivisionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubdivisionRepository")
            .field("groups", &lock(&self.inner.groups).len())
            .field("parents", &lock(&self.inner.parents).len())
            .finish()
    }
}

impl SubdivisionRepository {
    pub fn new(
        provider: Arc<dyn DefinitionProvider>,
        formats: Arc<AddressFormatRepository>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                formats,
                groups: Mutex::new(HashMap::new()),
                parents: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub(crate) fn from_weak(inner: &Weak<Inner>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }

    /// The subdivision `id` under `parents` (country code first), if any.
    pub fn get<S: AsRef<str>>(&self, id: &str, parents: &[S]) -> Result<Option<Arc<Subdivision>>> {
        let group = self.load_group(parents)?;
        self.create(id, &group)
    }

    /// Every subdivision under `parents`, keyed by id.
    pub fn all<S: AsRef<str>>(&self, parents: &[S]) -> Result<BTreeMap<String, Arc<Subdivision>>> {
        let group = self.load_group(parents)?;
        let mut all = BTreeMap::new();
        for id in group.subdivisions.keys() {
            if let Some(subdivision) = self.create(id, &group)? {
                all.insert(id.clone(), subdivision);
            }
        }
        Ok(all)
    }

    /// `id => name` under `parents`; local names are used when `locale`
    /// shares a candidate with the dataset's locale.
    pub fn list<S: AsRef<str>>(
        &self,
        parents: &[S],
        locale: Option<&str>,
    ) -> Result<BTreeMap<String, String>> {
        let group = self.load_group(parents)?;
        let use_local_name = match (locale, group.locale.as_deref()) {
            (Some(locale), Some(own)) => locale::match_candidates(locale, own),
            _ => false,
        };

        Ok(group
            .subdivisions
            .iter()
            .map(|(id, definition)| {
                let name = if use_local_name {
                    definition.local_name.as_ref().or(definition.name.as_ref())
                } else {
                    definition.name.as_ref()
                };
                (id.clone(), name.cloned().unwrap_or_else(|| id.clone()))
            })
            .collect())
    }

    /// Number of groups loaded so far (including empty ones).
    pub fn loaded_groups(&self) -> usize {
        lock(&self.inner.groups).len()
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    fn load_group<S: AsRef<str>>(&self, parents: &[S]) -> Result<Arc<Group>> {
        let parents: Vec<String> = parents.iter().map(|p| p.as_ref().to_string()).collect();
        let Some(group_key) = build_group(&parents) else {
            return Ok(Arc::new(Group::default()));
        };

        if let Some(group) = lock(&self.inner.groups).get(&group_key) {
            trace!(group = %group_key, "subdivision group cache hit");
            return Ok(Arc::clone(group));
        }

        let group = if self.has_data(&parents)? {
            debug!(group = %group_key, country_code = %parents[0], "loading subdivision group");
            let raw = self.inner.provider.subdivisions(&group_key)?;
            let customization = self.inner.provider.subdivision_customization(&group_key);
            process_group(&parents, raw, customization)
        } else {
            debug!(group = %group_key, "no subdivision data expected");
            Group::default()
        };

        let mut groups = lock(&self.inner.groups);
        let group = groups.entry(group_key).or_insert_with(|| Arc::new(group));
        Ok(Arc::clone(group))
    }

    /// Whether predefined subdivisions can exist under `parents`.
    fn has_data(&self, parents: &[String]) -> Result<bool> {
        let format = self.inner.formats.get(&parents[0])?;
        let depth = usize::from(format.subdivision_depth());
        if depth == 0 {
            return Ok(false);
        }

        if let Some((parent_id, grandparents)) = parents[1..].split_last().map(|(id, rest)| {
            let mut grandparents = vec![parents[0].clone()];
            grandparents.extend_from_slice(rest);
            (id, grandparents)
        }) {
            // The parent's own record is the most precise answer, when loaded.
            if let Some(parent_group) = build_group(&grandparents) {
                let groups = lock(&self.inner.groups);
                if let Some(definition) = groups
                    .get(&parent_group)
                    .and_then(|group| group.subdivisions.get(parent_id))
                {
                    return Ok(definition.has_children);
                }
            }
            return Ok(parents.len() <= depth);
        }

        Ok(true)
    }

    fn create(&self, id: &str, group: &Group) -> Result<Option<Arc<Subdivision>>> {
        let Some(definition) = group.subdivisions.get(id) else {
            return Ok(None);
        };

        let parent = group.parents.split_last().and_then(|(parent_id, grandparents)| {
            (!grandparents.is_empty()).then(|| ParentKey {
                parents: grandparents.to_vec(),
                id: parent_id.clone(),
            })
        });

        let subdivision = Subdivision::build(
            definition.clone(),
            parent,
            Arc::downgrade(&self.inner),
            &group.parents,
        )?;
        Ok(Some(Arc::new(subdivision)))
    }

    /// Resolves a parent once per (group, id) and shares it afterwards.
    pub(crate) fn cached_parent(&self, key: &ParentKey) -> Option<Arc<Subdivision>> {
        let group = build_group(&key.parents)?;
        let cache_key = (group, key.id.clone());

        if let Some(parent) = lock(&self.inner.parents).get(&cache_key) {
            return Some(Arc::clone(parent));
        }

        let parent = match self.get(&key.id, &key.parents) {
            Ok(parent) => parent?,
            Err(err) => {
                warn!(parent = %key.id, error = %err, "failed to resolve parent subdivision");
                return None;
            }
        };

        let mut parents = lock(&self.inner.parents);
        Some(Arc::clone(parents.entry(cache_key).or_insert(parent)))
    }
}

/// Fills in what the files leave out: country, locale, code and name
/// defaults, and the library customizations.
fn process_group(
    parents: &[String],
    raw: Option<SubdivisionGroupDefinition>,
    customization: Option<SubdivisionCustomization>,
) -> Group {
    let mut country_code = parents[0].to_uppercase();
    let mut locale = None;
    let mut group_parents = None;
    let mut records: Vec<(String, SubdivisionRecord)> = Vec::new();

    if let Some(raw) = raw {
        country_code = raw.country_code;
        locale = raw.locale;
        group_parents = raw.parents;
        records.extend(raw.subdivisions);
    }

    if let Some(customization) = customization {
        for id in customization.add {
            if !records.iter().any(|(existing, _)| *existing == id) {
                records.push((id, SubdivisionRecord::default()));
            }
        }
        for (id, patch) in customization.patches {
            if let Some((_, record)) = records.iter_mut().find(|(existing, _)| *existing == id) {
                *record = std::mem::take(record).merge(patch);
            }
        }
    }

    let group_parents = group_parents.unwrap_or_else(|| {
        let mut group_parents = parents.to_vec();
        group_parents[0] = country_code.clone();
        group_parents
    });

    let subdivisions = records
        .into_iter()
        .map(|(id, record)| {
            let code = record.code.unwrap_or_else(|| id.clone());
            let name = record.name.unwrap_or_else(|| code.clone());
            let local_code = record.local_code.or_else(|| record.local_name.clone());
            let local_name = record.local_name.or_else(|| local_code.clone());
            let definition = SubdivisionDefinition {
                country_code: Some(country_code.clone()),
                id: Some(id.clone()),
                locale: locale.clone(),
                code: Some(code),
                local_code,
                name: Some(name),
                local_name,
                iso_code: record.iso_code,
                postal_code_pattern: record.postal_code_pattern,
                pattern_type: record.pattern_type,
                has_children: record.has_children,
            };
            (id, definition)
        })
        .collect();

    Group {
        locale,
        parents: group_parents,
        subdivisions,
    }
}
