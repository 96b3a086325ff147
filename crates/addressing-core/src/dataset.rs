// crates/addressing-core/src/dataset.rs

use crate::address_format::AddressFormatRepository;
use crate::country::CountryRepository;
use crate::loader::{DefinitionProvider, EmbeddedProvider};
use crate::subdivision::SubdivisionRepository;
use once_cell::sync::Lazy;
use std::sync::Arc;

static GLOBAL: Lazy<Dataset> = Lazy::new(|| Dataset::new(Arc::new(EmbeddedProvider::new())));

/// The three registries over one [`DefinitionProvider`].
///
/// Cloning shares the caches. Hosts that bring their own data build a
/// `Dataset` once and pass it to the formatters and the validator.
#[derive(Clone, Debug)]
pub struct Dataset {
    address_formats: Arc<AddressFormatRepository>,
    subdivisions: SubdivisionRepository,
    countries: Arc<CountryRepository>,
}

impl Dataset {
    pub fn new(provider: Arc<dyn DefinitionProvider>) -> Self {
        let address_formats = Arc::new(AddressFormatRepository::new(Arc::clone(&provider)));
        let subdivisions =
            SubdivisionRepository::new(Arc::clone(&provider), Arc::clone(&address_formats));
        let countries = Arc::new(CountryRepository::new(provider));
        Self {
            address_formats,
            subdivisions,
            countries,
        }
    }

    /// Process-wide dataset over the embedded data.
    pub fn global() -> &'static Dataset {
        &GLOBAL
    }

    pub fn address_formats(&self) -> &AddressFormatRepository {
        &self.address_formats
    }

    pub fn subdivisions(&self) -> &SubdivisionRepository {
        &self.subdivisions
    }

    pub fn countries(&self) -> &CountryRepository {
        &self.countries
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::global().clone()
    }
}
