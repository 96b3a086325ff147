// crates/addressing-core/src/loader/directory.rs

use super::{AddressFormatDefinition, DefinitionProvider, SubdivisionGroupDefinition};
use crate::error::{AddressingError, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads datasets from a directory laid out as:
///
/// ```text
/// <root>/address_formats.json
/// <root>/subdivision/<group>.json
/// <root>/country/<locale>.json
/// ```
///
/// With the `compact` feature a `<name>.json.gz` file is used when the plain
/// JSON file is absent.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds `<dir>/<stem>.json` (or `.json.gz` with `compact`).
    fn locate(&self, dir: Option<&str>, stem: &str) -> Option<PathBuf> {
        let base = match dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        };

        let plain = base.join(format!("{stem}.json"));
        if plain.is_file() {
            return Some(plain);
        }

        #[cfg(feature = "compact")]
        {
            let gz = base.join(format!("{stem}.json.gz"));
            if gz.is_file() {
                return Some(gz);
            }
        }

        None
    }

    fn read_optional<T: DeserializeOwned>(
        &self,
        dir: Option<&str>,
        stem: &str,
    ) -> Result<Option<T>> {
        match self.locate(dir, stem) {
            Some(path) => {
                debug!(path = %path.display(), "reading dataset file");
                let reader = open_stream(&path)?;
                Ok(Some(serde_json::from_reader(reader)?))
            }
            None => Ok(None),
        }
    }
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the
/// extension asks for it.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        AddressingError::NotFound(format!("{}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    {
        if path.extension().is_some_and(|ext| ext == "gz") {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }
    }

    Ok(Box::new(reader))
}

impl DefinitionProvider for DirectoryProvider {
    fn address_formats(&self) -> Result<BTreeMap<String, AddressFormatDefinition>> {
        self.read_optional(None, "address_formats")?.ok_or_else(|| {
            AddressingError::NotFound(format!(
                "address_formats.json under {}",
                self.root.display()
            ))
        })
    }

    fn subdivisions(&self, group: &str) -> Result<Option<SubdivisionGroupDefinition>> {
        self.read_optional(Some("subdivision"), group)
    }

    fn country_names(&self, locale: &str) -> Result<Option<BTreeMap<String, String>>> {
        self.read_optional(Some("country"), locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "addressing-core-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("subdivision")).unwrap();
        fs::create_dir_all(dir.join("country")).unwrap();
        dir
    }

    #[test]
    fn reads_the_documented_layout() {
        let dir = scratch_dir("layout");
        fs::write(
            dir.join("address_formats.json"),
            r#"{"XA":{"format":"%address_line1\n%locality","subdivision_depth":1}}"#,
        )
        .unwrap();
        fs::write(
            dir.join("subdivision/XA.json"),
            r#"{"country_code":"XA","subdivisions":{"ONE":{"name":"One"}}}"#,
        )
        .unwrap();
        fs::write(dir.join("country/en.json"), r#"{"XA":"Exampleland"}"#).unwrap();

        let provider = DirectoryProvider::new(&dir);
        let formats = provider.address_formats().unwrap();
        assert_eq!(formats["XA"].subdivision_depth, Some(1));

        let group = provider.subdivisions("XA").unwrap().unwrap();
        assert_eq!(group.subdivisions["ONE"].name.as_deref(), Some("One"));
        assert!(provider.subdivisions("XB").unwrap().is_none());

        let names = provider.country_names("en").unwrap().unwrap();
        assert_eq!(names["XA"], "Exampleland");
        assert!(provider.country_names("fr").unwrap().is_none());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_format_file_is_not_found() {
        let dir = scratch_dir("missing");
        let err = DirectoryProvider::new(&dir).address_formats().unwrap_err();
        assert!(matches!(err, AddressingError::NotFound(_)));
        fs::remove_dir_all(dir).ok();
    }

    #[cfg(feature = "compact")]
    #[test]
    fn reads_gzipped_files() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = scratch_dir("gzip");
        let file = File::create(dir.join("country/de.json.gz")).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(r#"{"DE":"Deutschland"}"#.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let names = DirectoryProvider::new(&dir)
            .country_names("de")
            .unwrap()
            .unwrap();
        assert_eq!(names["DE"], "Deutschland");
        fs::remove_dir_all(dir).ok();
    }
}
